use std::sync::Arc;

use cinema_client::HttpTransport;
use cinema_client::ReqwestTransport;
use cinema_client::Request;
use cinema_client::Response;
use http::HeaderMap;
use http::HeaderValue;
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::session::Session;

/// Authenticated client for the cinema backend.
///
/// Cloning is cheap; clones share the transport and the [`Session`].
#[derive(Clone)]
pub struct ApiClient<T: HttpTransport> {
    transport: T,
    config: ClientConfig,
    session: Arc<Session>,
}

impl ApiClient<ReqwestTransport> {
    /// Client backed by reqwest with the default connection settings.
    pub fn with_default_transport(config: ClientConfig, session: Arc<Session>) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::new(transport, config, session))
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, config: ClientConfig, session: Arc<Session>) -> Self {
        Self {
            transport,
            config,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Issues `request` and returns the decoded JSON body (`Value::Null` for
    /// 204 responses).
    ///
    /// A 401 triggers at most one refresh through the session's registered
    /// handler followed by at most one replay of the request. The replay's
    /// outcome is returned as-is.
    pub async fn request(&self, request: ApiRequest) -> Result<Value> {
        let sent_token = self.session.access_token();
        let response = self.send(&request, sent_token.as_deref()).await?;

        if response.status == StatusCode::UNAUTHORIZED
            && !request.suppress_auth_retry
            && self.recover_from_unauthorized(sent_token.as_deref()).await
        {
            let retry = request.into_retry();
            let token = self.session.access_token();
            let retried = self.send(&retry, token.as_deref()).await?;
            return into_result(retried);
        }

        into_result(response)
    }

    /// [`Self::request`] followed by deserialization into `R`.
    pub async fn request_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let value = self.request(request).await?;
        serde_json::from_value(value).map_err(ApiError::Decode)
    }

    /// [`Self::request`] for endpoints whose body is irrelevant, typically 204s.
    pub async fn request_empty(&self, request: ApiRequest) -> Result<()> {
        self.request(request).await.map(|_| ())
    }

    async fn send(&self, request: &ApiRequest, access_token: Option<&str>) -> Result<Response> {
        let outbound = self.build(request, access_token)?;
        debug!(
            method = %outbound.method,
            url = %outbound.url,
            suppress_auth_retry = request.suppress_auth_retry,
            "sending request"
        );
        let response = self.transport.execute(outbound).await?;
        debug!(status = response.status.as_u16(), "received response");
        Ok(response)
    }

    fn build(&self, request: &ApiRequest, access_token: Option<&str>) -> Result<Request> {
        let mut url = self.config.url_for(&request.path)?;
        let pairs = request.query.pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, &value);
            }
        }

        let mut headers = HeaderMap::new();
        if request.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = access_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
                ApiError::InvalidHeader {
                    name: AUTHORIZATION.to_string(),
                    reason: err.to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        // Caller headers go last and replace defaults with the same name.
        for name in request.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in &request.headers {
            headers.append(name.clone(), value.clone());
        }

        Ok(Request {
            method: request.method.clone(),
            url: url.to_string(),
            headers,
            body: request.body.clone(),
        })
    }

    /// Decides whether a 401 may be replayed. Refreshes are single-flighted:
    /// a request that waited on the gate while another one rotated the access
    /// token replays with the new token without refreshing again.
    async fn recover_from_unauthorized(&self, sent_token: Option<&str>) -> bool {
        let Some(handler) = self.session.refresh_handler() else {
            return false;
        };

        let _gate = self.session.refresh_gate().lock().await;
        if let Some(current) = self.session.access_token()
            && Some(current.as_str()) != sent_token
        {
            debug!("access token already rotated by a concurrent refresh");
            return true;
        }

        match handler.refresh().await {
            Ok(refreshed) => {
                if !refreshed {
                    debug!("refresh handler declined to refresh the session");
                }
                refreshed
            }
            Err(err) => {
                warn!(error = %err, "refresh handler failed");
                false
            }
        }
    }
}

fn into_result(response: Response) -> Result<Value> {
    if !response.status.is_success() {
        return Err(ApiError::from_response(response.status, &response.body));
    }
    if response.status == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&response.body).map_err(ApiError::Decode)
}
