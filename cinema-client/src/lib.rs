//! HTTP transport used by the cinema API client.
//!
//! This crate knows nothing about the backend's resources or its auth
//! scheme. It moves a fully-built [`Request`] over the wire and hands back
//! the raw [`Response`]; everything above that lives in `cinema-api`.

mod error;
mod request;
mod transport;

pub use crate::error::TransportError;
pub use crate::request::Request;
pub use crate::request::Response;
pub use crate::transport::HttpTransport;
pub use crate::transport::ReqwestTransport;
