//! Session store: the single source of truth for authentication.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use docmgr_core::result::AppResult;
use docmgr_core::traits::token_store::TokenStore;
use docmgr_entity::session::Credential;

/// Holds the current credential and mirrors it to durable storage.
///
/// Authentication is derived from credential presence and is never stored
/// separately. Observers can [`subscribe`](Self::subscribe) to transitions.
#[derive(Debug)]
pub struct SessionStore {
    /// Durable backing store.
    store: Arc<dyn TokenStore>,
    /// Fixed key the credential is persisted under.
    key: String,
    /// Current credential; `None` means unauthenticated.
    credential: watch::Sender<Option<Credential>>,
}

impl SessionStore {
    /// Create an unauthenticated session store.
    pub fn new(store: Arc<dyn TokenStore>, key: impl Into<String>) -> Self {
        let (credential, _) = watch::channel(None);
        Self {
            store,
            key: key.into(),
            credential,
        }
    }

    /// Restore a previously persisted credential.
    ///
    /// No network call is made; an expired token is discovered on first use.
    /// Returns whether the session is now authenticated.
    pub async fn restore(&self) -> AppResult<bool> {
        let restored = self
            .store
            .load(&self.key)
            .await?
            .and_then(|token| Credential::new(token.trim()).ok());

        if restored.is_some() {
            info!("Restored persisted session");
        } else {
            debug!("No persisted session to restore");
        }
        self.credential.send_replace(restored);
        Ok(self.is_authenticated())
    }

    /// Establish a session with `credential`.
    ///
    /// The credential is persisted first; if that fails the session is left
    /// unchanged.
    pub async fn login(&self, credential: Credential) -> AppResult<()> {
        self.store.save(&self.key, credential.as_str()).await?;
        self.credential.send_replace(Some(credential));
        info!("Session established");
        Ok(())
    }

    /// End the session and forget the persisted credential.
    ///
    /// The in-memory credential is cleared even if durable removal fails.
    pub async fn logout(&self) -> AppResult<()> {
        self.credential.send_replace(None);
        info!("Session cleared");
        self.store.remove(&self.key).await
    }

    /// The current credential, if any.
    pub fn credential(&self) -> Option<Credential> {
        self.credential.borrow().clone()
    }

    /// Whether a credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.credential.borrow().is_some()
    }

    /// Watch credential transitions.
    pub fn subscribe(&self) -> watch::Receiver<Option<Credential>> {
        self.credential.subscribe()
    }
}
