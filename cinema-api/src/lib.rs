//! Authenticated client for the cinema ticketing backend.
//!
//! [`ApiClient`] is the single choke point for outbound calls. It reads
//! bearer credentials from a shared [`Session`], normalizes error responses
//! into [`ApiError`], and retries a request at most once after a successful
//! token refresh. Typed wrappers for every backend endpoint live in
//! [`endpoint`], and the JSON shapes they exchange live in [`models`].

mod client;
mod config;
pub mod endpoint;
mod error;
pub mod models;
mod query;
mod request;
mod session;

pub use crate::client::ApiClient;
pub use crate::config::BASE_URL_ENV_VAR;
pub use crate::config::ClientConfig;
pub use crate::config::DEFAULT_BASE_URL;
pub use crate::error::ApiError;
pub use crate::error::Result;
pub use crate::query::QueryParams;
pub use crate::query::QueryValue;
pub use crate::request::ApiRequest;
pub use crate::session::RefreshHandler;
pub use crate::session::Session;
pub use cinema_client::HttpTransport;
pub use cinema_client::ReqwestTransport;
pub use cinema_client::TransportError;
