use cinema_client::TransportError;
use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response. Passed through untouched.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The backend answered with a non-2xx status.
    #[error("{}", status_message(.status.as_u16(), .detail.as_deref()))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl ApiError {
    /// HTTP status carried by a normalized error response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Builds the normalized error for a failed response. The body is only
    /// consulted for a non-empty string `detail` field; anything else, including
    /// a body that is not JSON at all, is ignored.
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|payload| match payload.get("detail") {
                Some(Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
                _ => None,
            });
        ApiError::Status { status, detail }
    }
}

fn status_message(code: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("Request failed with status {code}: {detail}"),
        None => format!("Request failed with status {code}"),
    }
}
