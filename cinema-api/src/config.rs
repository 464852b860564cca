use url::Url;

use crate::error::ApiError;
use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
/// Conventional override for [`DEFAULT_BASE_URL`], read by front ends.
pub const BASE_URL_ENV_VAR: &str = "CINEMA_API_BASE_URL";

/// Where the backend lives. Resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL. Paths are appended verbatim so a base
    /// URL carrying a prefix such as `/api` keeps it.
    pub(crate) fn url_for(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{path}", self.base_url);
        Url::parse(&raw).map_err(|err| ApiError::InvalidUrl {
            url: raw,
            reason: err.to_string(),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
