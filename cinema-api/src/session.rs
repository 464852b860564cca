use std::fmt;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::Mutex;

/// Callback the client invokes when a request comes back 401.
///
/// `Ok(true)` means fresh credentials are installed in the [`Session`] and the
/// request may be replayed. `Ok(false)` and `Err(_)` both mean the session
/// could not be recovered; the error text is only logged.
#[async_trait]
pub trait RefreshHandler: Send + Sync {
    async fn refresh(&self) -> Result<bool, String>;
}

/// In-memory credentials shared by every clone of an [`crate::ApiClient`].
///
/// Owned by the application's composition root and handed to the client by
/// `Arc`. Persisting these values is the session owner's job.
#[derive(Default)]
pub struct Session {
    access_token: RwLock<Option<String>>,
    refresh_token: RwLock<Option<String>>,
    refresh_handler: RwLock<Option<Arc<dyn RefreshHandler>>>,
    refresh_gate: Mutex<()>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access_token: Option<&str>, refresh_token: Option<&str>) -> Self {
        let session = Self::new();
        session.set_access_token(access_token);
        session.set_refresh_token(refresh_token);
        session
    }

    pub fn access_token(&self) -> Option<String> {
        read_slot(&self.access_token)
    }

    /// Empty strings clear the slot, same as `None`.
    pub fn set_access_token(&self, token: Option<&str>) {
        write_slot(&self.access_token, token);
    }

    pub fn refresh_token(&self) -> Option<String> {
        read_slot(&self.refresh_token)
    }

    pub fn set_refresh_token(&self, token: Option<&str>) {
        write_slot(&self.refresh_token, token);
    }

    pub fn clear_tokens(&self) {
        self.set_access_token(None);
        self.set_refresh_token(None);
    }

    /// Installs the 401 callback. The previous handler, if any, is replaced.
    pub fn set_refresh_handler(&self, handler: Arc<dyn RefreshHandler>) {
        *self
            .refresh_handler
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    pub fn clear_refresh_handler(&self) {
        self.refresh_handler
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn has_refresh_handler(&self) -> bool {
        self.refresh_handler().is_some()
    }

    pub(crate) fn refresh_handler(&self) -> Option<Arc<dyn RefreshHandler>> {
        self.refresh_handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Serializes refresh attempts across concurrent requests.
    pub(crate) fn refresh_gate(&self) -> &Mutex<()> {
        &self.refresh_gate
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("has_access_token", &self.access_token().is_some())
            .field("has_refresh_token", &self.refresh_token().is_some())
            .field("has_refresh_handler", &self.has_refresh_handler())
            .finish()
    }
}

fn read_slot(slot: &RwLock<Option<String>>) -> Option<String> {
    slot.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn write_slot(slot: &RwLock<Option<String>>, token: Option<&str>) {
    let value = token.filter(|token| !token.is_empty()).map(str::to_string);
    *slot.write().unwrap_or_else(PoisonError::into_inner) = value;
}
