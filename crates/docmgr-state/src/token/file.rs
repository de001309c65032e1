//! File-backed token store.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use docmgr_core::error::{AppError, ErrorKind};
use docmgr_core::result::AppResult;
use docmgr_core::traits::token_store::TokenStore;

/// Token store keeping one file per key under a directory.
///
/// Entries survive process restarts, which is what lets a session be
/// restored on the next start.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    /// Directory holding the entries.
    root: PathBuf,
}

impl FileTokenStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a key to its file, rejecting keys that would escape the root.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\']);
        if !valid {
            return Err(AppError::validation(format!("Invalid token store key: {key:?}")));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.resolve(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read {}", path.display()),
                e,
            )),
        }
    }

    async fn save(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create {}", self.root.display()),
                e,
            )
        })?;
        fs::write(&path, value).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write {}", path.display()),
                e,
            )
        })?;
        debug!(path = %path.display(), "Persisted entry");
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Removed entry");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove {}", path.display()),
                e,
            )),
        }
    }
}
