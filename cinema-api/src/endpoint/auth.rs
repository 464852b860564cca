use cinema_client::HttpTransport;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::AuthTokens;
use crate::models::AuthUser;
use crate::models::Credentials;
use crate::models::RefreshRequest;
use crate::request::ApiRequest;

// These only talk to the backend. Installing the returned tokens into the
// session is the caller's job.
impl<T: HttpTransport> ApiClient<T> {
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthTokens> {
        self.request_json(ApiRequest::post("/auth/register").with_json(credentials)?)
            .await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthTokens> {
        self.request_json(ApiRequest::post("/auth/login").with_json(credentials)?)
            .await
    }

    /// Exchanges `refresh_token` for a new pair. Never goes through the
    /// refresh-and-retry path itself.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.request_json(
            ApiRequest::post("/auth/refresh")
                .with_json(&body)?
                .suppress_auth_retry(),
        )
        .await
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.request_empty(
            ApiRequest::post("/auth/logout")
                .with_json(&body)?
                .suppress_auth_retry(),
        )
        .await
    }

    pub async fn me(&self) -> Result<AuthUser> {
        self.request_json(ApiRequest::get("/auth/me")).await
    }
}
