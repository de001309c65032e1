//! Callback contract between the upload view and whoever owns the listing.

use async_trait::async_trait;

use docmgr_entity::file::UploadAck;

/// Notified once after the backend acknowledges an upload.
#[async_trait]
pub trait UploadObserver: Send + Sync {
    /// Called with the backend's acknowledgment of the upload.
    async fn on_uploaded(&self, ack: &UploadAck);
}
