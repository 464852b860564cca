use http::HeaderMap;
use http::HeaderName;
use http::HeaderValue;
use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::error::Result;
use crate::query::QueryParams;

/// Everything needed to issue one logical call against the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub path: String,
    pub method: Method,
    pub query: QueryParams,
    pub body: Option<Value>,
    pub headers: HeaderMap,
    /// Skip the refresh-and-retry path on 401. Set on retries and on calls
    /// that are themselves part of the session lifecycle.
    pub suppress_auth_retry: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            query: QueryParams::default(),
            body: None,
            headers: HeaderMap::new(),
            suppress_auth_retry: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| ApiError::InvalidHeader {
                name: name.to_string(),
                reason: err.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| ApiError::InvalidHeader {
            name: name.to_string(),
            reason: err.to_string(),
        })?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn suppress_auth_retry(mut self) -> Self {
        self.suppress_auth_retry = true;
        self
    }

    /// The one and only retry of this request after a token refresh.
    pub(crate) fn into_retry(self) -> Self {
        self.suppress_auth_retry()
    }
}
