//! Owns the lifetime of a signed-in session: persisted tokens, the refresh
//! callback registered on the shared [`cinema_api::Session`], and the cached
//! user.

mod error;
mod manager;
mod store;

pub use error::SessionError;
pub use error::StoreError;
pub use manager::SessionManager;
pub use store::ACCESS_TOKEN_KEY;
pub use store::FileTokenStore;
pub use store::MemoryTokenStore;
pub use store::REFRESH_TOKEN_KEY;
pub use store::SESSION_FILENAME;
pub use store::TokenStore;
