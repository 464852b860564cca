use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::Weak;

use async_trait::async_trait;
use cinema_api::ApiClient;
use cinema_api::ApiError;
use cinema_api::HttpTransport;
use cinema_api::RefreshHandler;
use cinema_api::models::AuthTokens;
use cinema_api::models::AuthUser;
use cinema_api::models::Credentials;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::error::SessionError;
use crate::store::ACCESS_TOKEN_KEY;
use crate::store::REFRESH_TOKEN_KEY;
use crate::store::TokenStore;

type Result<T> = std::result::Result<T, SessionError>;

/// Keeps the client's [`cinema_api::Session`], the token store and the
/// cached user in step.
///
/// While a refresh token is known, the manager registers itself as the
/// session's refresh handler so any request that hits a 401 can rotate the
/// pair transparently. Dropping the manager unregisters it.
pub struct SessionManager<T: HttpTransport> {
    inner: Arc<Inner<T>>,
}

struct Inner<T: HttpTransport> {
    client: ApiClient<T>,
    store: Arc<dyn TokenStore>,
    user: RwLock<Option<AuthUser>>,
}

impl<T: HttpTransport> SessionManager<T> {
    pub fn new(client: ApiClient<T>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                store,
                user: RwLock::new(None),
            }),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.inner.client
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.inner.cached_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.cached_user().is_some() && self.inner.client.session().access_token().is_some()
    }

    /// Loads persisted tokens into the session and confirms them against
    /// `/auth/me`. Tokens that cannot be validated or refreshed are wiped.
    pub async fn restore(&self) -> Result<Option<AuthUser>> {
        let access_token = self.inner.store.load(ACCESS_TOKEN_KEY)?;
        let refresh_token = self.inner.store.load(REFRESH_TOKEN_KEY)?;

        let session = self.inner.client.session();
        session.set_access_token(access_token.as_deref());
        session.set_refresh_token(refresh_token.as_deref());
        if refresh_token.is_some() {
            self.register_refresh_handler();
        }

        if access_token.is_none() {
            debug!("no stored access token; starting signed out");
            self.inner.set_user(None);
            return Ok(None);
        }

        match self.inner.client.me().await {
            Ok(user) => {
                info!(user_id = user.id, "restored session");
                self.inner.set_user(Some(user.clone()));
                Ok(Some(user))
            }
            // An unreachable backend says nothing about the stored tokens.
            Err(err @ ApiError::Transport(_)) => Err(err.into()),
            Err(err) => {
                debug!(error = %err, "stored access token rejected; trying refresh");
                if self.inner.refresh_session().await? {
                    Ok(self.inner.cached_user())
                } else {
                    // Nothing left to rotate with; drop the rejected token too.
                    self.inner.clear()?;
                    Ok(None)
                }
            }
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthUser> {
        let tokens = self.inner.client.login(credentials).await?;
        self.establish(tokens)
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<AuthUser> {
        let tokens = self.inner.client.register(credentials).await?;
        self.establish(tokens)
    }

    /// Revokes the refresh token if possible, then always clears local state.
    pub async fn logout(&self) -> Result<()> {
        let refresh_token = match self.inner.client.session().refresh_token() {
            Some(token) => Some(token),
            None => self.inner.store.load(REFRESH_TOKEN_KEY).unwrap_or_default(),
        };
        if let Some(token) = refresh_token
            && let Err(err) = self.inner.client.logout(&token).await
        {
            warn!(error = %err, "failed to revoke refresh token; clearing local session anyway");
        }

        self.inner.clear()?;
        info!("logged out");
        Ok(())
    }

    /// Rotates the token pair now. `Ok(false)` means the session is gone.
    pub async fn refresh_session(&self) -> Result<bool> {
        self.inner.refresh_session().await
    }

    fn establish(&self, tokens: AuthTokens) -> Result<AuthUser> {
        self.inner.install(&tokens)?;
        self.register_refresh_handler();
        info!(user_id = tokens.user.id, "signed in");
        Ok(tokens.user)
    }

    fn register_refresh_handler(&self) {
        let handler = SessionRefresher {
            inner: Arc::downgrade(&self.inner),
        };
        self.inner
            .client
            .session()
            .set_refresh_handler(Arc::new(handler));
    }
}

impl<T: HttpTransport> Drop for SessionManager<T> {
    fn drop(&mut self) {
        self.inner.client.session().clear_refresh_handler();
    }
}

impl<T: HttpTransport> Inner<T> {
    fn cached_user(&self) -> Option<AuthUser> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_user(&self, user: Option<AuthUser>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    async fn refresh_session(&self) -> Result<bool> {
        let Some(refresh_token) = self.client.session().refresh_token() else {
            debug!("no refresh token to rotate");
            return Ok(false);
        };

        match self.client.refresh(&refresh_token).await {
            Ok(tokens) => {
                self.install(&tokens)?;
                info!(user_id = tokens.user.id, "refreshed session");
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed; clearing session");
                self.clear()?;
                Ok(false)
            }
        }
    }

    fn install(&self, tokens: &AuthTokens) -> Result<()> {
        let session = self.client.session();
        session.set_access_token(Some(&tokens.access_token));
        session.set_refresh_token(Some(&tokens.refresh_token));
        self.set_user(Some(tokens.user.clone()));

        self.store.save(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        self.store.save(REFRESH_TOKEN_KEY, &tokens.refresh_token)?;
        Ok(())
    }

    /// In-memory state is cleared before touching the store so a storage
    /// failure never leaves the process signed in.
    fn clear(&self) -> Result<()> {
        let session = self.client.session();
        session.clear_tokens();
        session.clear_refresh_handler();
        self.set_user(None);

        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(REFRESH_TOKEN_KEY)?;
        Ok(())
    }
}

/// Refresh callback handed to the session. Holds the manager weakly so the
/// session never keeps its owner alive.
struct SessionRefresher<T: HttpTransport> {
    inner: Weak<Inner<T>>,
}

#[async_trait]
impl<T: HttpTransport> RefreshHandler for SessionRefresher<T> {
    async fn refresh(&self) -> std::result::Result<bool, String> {
        let Some(inner) = self.inner.upgrade() else {
            return Ok(false);
        };
        inner
            .refresh_session()
            .await
            .map_err(|err| format!("session refresh failed: {err}"))
    }
}
