use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::TransportError;
use crate::request::Request;
use crate::request::Response;

/// Executes one request and returns whatever the server answered.
///
/// Implementations must not interpret the status code: a 401 or a 500 is a
/// successful transport round-trip. Only failures that prevent a response
/// from arriving at all are reported as [`TransportError`].
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    async fn execute(&self, req: Request) -> Result<Response, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("cinema-client/{version}");

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|err| TransportError::Build(err.to_string()))?;

        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, req: Request) -> Result<Response, TransportError> {
        let Request {
            method,
            url,
            headers,
            body,
        } = req;

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            let payload = serde_json::to_vec(&body)
                .map_err(|err| TransportError::Build(format!("failed to encode body: {err}")))?;
            builder = builder.body(payload);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!(%method, %url, status = status.as_u16(), "request completed");

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
