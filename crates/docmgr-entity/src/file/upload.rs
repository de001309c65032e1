//! Upload payload and acknowledgment.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::version::FileVersionRecord;

/// A file selected for upload: its name and its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Name sent as the multipart file name.
    pub file_name: String,
    /// File content.
    pub content: Bytes,
}

impl UploadFile {
    /// Create an upload payload.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// The backend's acknowledgment of a successful upload.
///
/// The raw JSON is kept as received; the backend normally echoes the
/// created record, exposed through [`UploadAck::record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadAck {
    /// Body returned by the upload endpoint.
    pub raw: serde_json::Value,
}

impl UploadAck {
    /// Interpret the acknowledgment as the created file version.
    pub fn record(&self) -> Option<FileVersionRecord> {
        serde_json::from_value(self.raw.clone()).ok()
    }
}
