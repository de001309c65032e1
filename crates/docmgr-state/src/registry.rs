//! File registry: the most recently fetched file-version snapshot.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use docmgr_entity::file::FileVersionRecord;
use docmgr_entity::session::Credential;
use docmgr_gateway::{DocumentGateway, GatewayError, ListFilter};

use crate::status::OperationStatus;

/// Status text shown when a listing fails for any reason but authorization.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch files.";

/// Result of one [`FileRegistry::refresh`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot with this many records was applied.
    Loaded(usize),
    /// The backend rejected the credential; the snapshot was cleared and the
    /// session must be ended.
    Unauthorized,
    /// The listing failed; the snapshot was cleared.
    Failed(GatewayError),
    /// A newer refresh or a clear happened meanwhile; the result was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct RegistryState {
    snapshot: Vec<FileVersionRecord>,
    status: OperationStatus,
    /// Bumped by every refresh and clear; only the newest refresh applies.
    generation: u64,
}

/// Client-side cache of the file-version listing.
///
/// The snapshot is replaced wholesale, never patched. The lock is never held
/// across an await point.
#[derive(Debug, Default)]
pub struct FileRegistry {
    state: Mutex<RegistryState>,
}

impl FileRegistry {
    /// Create an empty, idle registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch a fresh snapshot and apply it if no newer operation superseded it.
    pub async fn refresh(
        &self,
        gateway: &dyn DocumentGateway,
        credential: Option<&Credential>,
    ) -> RefreshOutcome {
        let ticket = {
            let mut state = self.lock();
            state.generation += 1;
            state.status = OperationStatus::Loading;
            state.generation
        };

        let result = gateway
            .list_versions(credential, &ListFilter::default())
            .await;

        let mut state = self.lock();
        if state.generation != ticket {
            debug!(ticket, current = state.generation, "Dropping superseded listing");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(records) => {
                let count = records.len();
                debug!(count, "Applied file version snapshot");
                state.snapshot = records;
                state.status = OperationStatus::Success;
                RefreshOutcome::Loaded(count)
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Listing rejected the session credential");
                state.snapshot.clear();
                state.status = OperationStatus::Idle;
                RefreshOutcome::Unauthorized
            }
            Err(e) => {
                warn!(error = %e, "Listing failed");
                state.snapshot.clear();
                state.status = OperationStatus::Error(FETCH_FAILED_MESSAGE.to_string());
                RefreshOutcome::Failed(e)
            }
        }
    }

    /// Drop the snapshot and return to idle. Outstanding refreshes are discarded.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.snapshot.clear();
        state.status = OperationStatus::Idle;
    }

    /// A copy of the current snapshot, in backend order.
    pub fn snapshot(&self) -> Vec<FileVersionRecord> {
        self.lock().snapshot.clone()
    }

    /// The current operation status.
    pub fn status(&self) -> OperationStatus {
        self.lock().status.clone()
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.lock().snapshot.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().snapshot.is_empty()
    }
}
