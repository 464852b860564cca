pub mod cli;
mod commands;
pub mod home;

pub use cli::Cli;
pub use cli::Command;
pub use commands::run;
