//! Upload view.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;
use tracing::{debug, warn};

use docmgr_entity::file::{UploadAck, UploadFile};
use docmgr_state::{AppContext, UploadObserver};

/// Shown when the form is submitted without a file or a parent URL.
pub const MISSING_INPUT_MESSAGE: &str = "Select file and parent_url!";

/// Shown after the backend acknowledges an upload.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Upload successful!";

/// Form for uploading a new version of a file.
///
/// Buffers are cleared only after the backend acknowledges the upload, so a
/// failed attempt can be retried as is.
pub struct UploadView {
    ctx: Arc<AppContext>,
    on_upload: Arc<dyn UploadObserver>,
    /// Selected local file.
    pub file: Option<PathBuf>,
    /// Parent URL buffer.
    pub parent_url: String,
    message: Option<String>,
}

impl UploadView {
    /// Create an empty form. `on_upload` runs once per acknowledged upload.
    pub fn new(ctx: Arc<AppContext>, on_upload: Arc<dyn UploadObserver>) -> Self {
        Self {
            ctx,
            on_upload,
            file: None,
            parent_url: String::new(),
            message: None,
        }
    }

    /// Status message of the last submission.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Upload the selected file under the buffered parent URL.
    pub async fn submit(&mut self) -> Option<UploadAck> {
        self.message = None;

        let path = match &self.file {
            Some(path) if !self.parent_url.trim().is_empty() => path.clone(),
            _ => {
                self.message = Some(MISSING_INPUT_MESSAGE.to_string());
                return None;
            }
        };

        let content = match fs::read(&path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read upload source");
                self.message = Some(format!("Cannot read {}: {e}", path.display()));
                return None;
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let upload = UploadFile::new(file_name, content);

        let credential = self.ctx.credential();
        let result = self
            .ctx
            .gateway()
            .upload_version(credential.as_ref(), &upload, &self.parent_url)
            .await;

        match result {
            Ok(ack) => {
                debug!(file_name = %upload.file_name, "Upload acknowledged");
                self.file = None;
                self.parent_url.clear();
                self.message = Some(UPLOAD_SUCCESS_MESSAGE.to_string());
                self.on_upload.on_uploaded(&ack).await;
                Some(ack)
            }
            Err(e) => {
                self.message = Some(e.to_string());
                None
            }
        }
    }

    /// Render the form state.
    pub fn render(&self) -> String {
        let parent_url = if self.parent_url.is_empty() {
            "(exp. /documents/review.pdf)"
        } else {
            self.parent_url.as_str()
        };
        let file = self
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none selected)".to_string());

        let mut out = format!("Upload\n  parent_url: {parent_url}\n  file:       {file}\n");
        if let Some(message) = &self.message {
            out.push_str(message);
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Debug for UploadView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadView")
            .field("file", &self.file)
            .field("parent_url", &self.parent_url)
            .field("message", &self.message)
            .finish()
    }
}
