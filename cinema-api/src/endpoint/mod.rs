//! Typed wrappers over [`ApiClient::request`](crate::ApiClient::request),
//! one module per backend surface.

mod admin;
mod auth;
mod catalog;
mod checkout;
mod me;
mod reservations;
mod tickets;

pub use admin::AuditoriumQuery;
pub use admin::DEFAULT_SALES_LIMIT;
pub use catalog::MovieQuery;
pub use catalog::ShowtimeQuery;
pub use catalog::TheaterQuery;
pub use me::DEFAULT_RECOMMENDATION_LIMIT;
pub use tickets::STAFF_TOKEN_HEADER;
