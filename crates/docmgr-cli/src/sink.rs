//! Download sink writing payloads into a directory.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::info;

use docmgr_core::error::{AppError, ErrorKind};
use docmgr_core::result::AppResult;
use docmgr_core::traits::download::DownloadSink;

/// Saves downloads into a fixed directory under the record's file name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    /// Destination directory, created on first save.
    root: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Final path component of a backend-supplied file name.
fn safe_file_name(file_name: &str) -> Option<&str> {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, file_name: &str, payload: Bytes) -> AppResult<PathBuf> {
        let name = safe_file_name(file_name).ok_or_else(|| {
            AppError::validation(format!("Cannot save download as {file_name:?}"))
        })?;

        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create {}", self.root.display()),
                e,
            )
        })?;

        let path = self.root.join(name);
        fs::write(&path, &payload).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write {}", path.display()),
                e,
            )
        })?;

        info!(path = %path.display(), size = payload.len(), "Saved download");
        Ok(path)
    }
}
