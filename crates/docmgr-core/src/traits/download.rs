//! Destination for downloaded file versions.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// The "save as" action triggered after a successful download.
#[async_trait]
pub trait DownloadSink: Send + Sync + std::fmt::Debug + 'static {
    /// Persist `payload` under `file_name` and return where it landed.
    async fn save(&self, file_name: &str, payload: Bytes) -> AppResult<PathBuf>;
}
