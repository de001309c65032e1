//! Application context wiring the session store and file registry together.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use docmgr_core::result::AppResult;
use docmgr_core::traits::token_store::TokenStore;
use docmgr_entity::file::UploadAck;
use docmgr_entity::session::Credential;
use docmgr_gateway::DocumentGateway;

use crate::observer::UploadObserver;
use crate::registry::{FileRegistry, RefreshOutcome};
use crate::session::SessionStore;

/// Shared client state handed explicitly to every view and command.
///
/// Propagation rules:
/// - login refreshes the registry
/// - logout clears the registry
/// - an unauthorized listing for the current credential logs out
#[derive(Debug)]
pub struct AppContext {
    session: SessionStore,
    registry: FileRegistry,
    gateway: Arc<dyn DocumentGateway>,
}

impl AppContext {
    /// Build a context over a gateway and a durable token store.
    pub fn new(
        gateway: Arc<dyn DocumentGateway>,
        token_store: Arc<dyn TokenStore>,
        token_key: impl Into<String>,
    ) -> Self {
        Self {
            session: SessionStore::new(token_store, token_key),
            registry: FileRegistry::new(),
            gateway,
        }
    }

    /// The session store.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The file registry.
    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }

    /// The backend gateway.
    pub fn gateway(&self) -> &dyn DocumentGateway {
        self.gateway.as_ref()
    }

    /// The current credential, if authenticated.
    pub fn credential(&self) -> Option<Credential> {
        self.session.credential()
    }

    /// Restore a persisted session without contacting the backend.
    pub async fn restore(&self) -> AppResult<bool> {
        self.session.restore().await
    }

    /// Establish a session and load the caller's file versions.
    pub async fn login(&self, credential: Credential) -> AppResult<RefreshOutcome> {
        self.session.login(credential).await?;
        Ok(self.refresh().await)
    }

    /// End the session and drop any listing belonging to it.
    pub async fn logout(&self) -> AppResult<()> {
        let result = self.session.logout().await;
        self.registry.clear();
        result
    }

    /// Reload the registry with the current credential.
    ///
    /// An unauthorized answer ends the session, unless the session changed
    /// while the request was outstanding.
    pub async fn refresh(&self) -> RefreshOutcome {
        let credential = self.session.credential();
        let outcome = self
            .registry
            .refresh(self.gateway.as_ref(), credential.as_ref())
            .await;

        if outcome == RefreshOutcome::Unauthorized && self.session.credential() == credential {
            info!("Session rejected by backend, logging out");
            if let Err(e) = self.logout().await {
                warn!(error = %e, "Failed to clear persisted session");
            }
        }
        outcome
    }
}

#[async_trait]
impl UploadObserver for AppContext {
    async fn on_uploaded(&self, _ack: &UploadAck) {
        self.refresh().await;
    }
}
