//! File-list view: the authenticated screen.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use docmgr_core::result::AppResult;
use docmgr_core::traits::download::DownloadSink;
use docmgr_entity::file::FileVersionRecord;
use docmgr_entity::session::Credential;
use docmgr_state::{AppContext, OperationStatus, RefreshOutcome, UploadObserver};

use crate::output::permission_mark;
use crate::views::upload::UploadView;

/// Shown while a listing is outstanding.
pub const LOADING_MESSAGE: &str = "Loading file versions...";

/// Shown when the listing succeeded but holds nothing.
pub const EMPTY_MESSAGE: &str = "No file versions found. Please upload a file.";

/// Lists the caller's file versions, embeds the upload form, and offers
/// download and logout actions.
pub struct FileListView {
    ctx: Arc<AppContext>,
    sink: Arc<dyn DownloadSink>,
    credential_rx: watch::Receiver<Option<Credential>>,
    was_authenticated: bool,
    upload: UploadView,
    notice: Option<String>,
}

impl FileListView {
    /// Mount the view and trigger the initial refresh.
    pub async fn mount(ctx: Arc<AppContext>, sink: Arc<dyn DownloadSink>) -> Self {
        let mut credential_rx = ctx.session().subscribe();
        let was_authenticated = credential_rx.borrow_and_update().is_some();
        let on_upload: Arc<dyn UploadObserver> = ctx.clone();
        let upload = UploadView::new(Arc::clone(&ctx), on_upload);

        let view = Self {
            ctx,
            sink,
            credential_rx,
            was_authenticated,
            upload,
            notice: None,
        };
        view.ctx.refresh().await;
        view
    }

    /// React to credential transitions since the last call.
    ///
    /// A transition from absent to present triggers a refresh. Returns the
    /// refresh outcome when one ran.
    pub async fn sync(&mut self) -> Option<RefreshOutcome> {
        if !self.credential_rx.has_changed().unwrap_or(false) {
            return None;
        }
        let authenticated = self.credential_rx.borrow_and_update().is_some();
        let signed_in = authenticated && !self.was_authenticated;
        self.was_authenticated = authenticated;

        if signed_in {
            debug!("Credential appeared, refreshing file list");
            Some(self.ctx.refresh().await)
        } else {
            None
        }
    }

    /// Reload the listing.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        self.notice = None;
        self.ctx.refresh().await
    }

    /// Download a version and hand it to the sink under its file name.
    pub async fn download(&mut self, record: &FileVersionRecord) -> Option<PathBuf> {
        self.notice = None;
        match self.fetch_and_save(record).await {
            Ok(path) => {
                self.notice = Some(format!("Saved {} to {}", record.file_name, path.display()));
                Some(path)
            }
            Err(message) => {
                warn!(parent_url = %record.parent_url, "{message}");
                self.notice = Some(message);
                None
            }
        }
    }

    async fn fetch_and_save(&self, record: &FileVersionRecord) -> Result<PathBuf, String> {
        let credential = self.ctx.credential();
        let payload = self
            .ctx
            .gateway()
            .download_version(
                credential.as_ref(),
                &record.parent_url,
                Some(record.version_number),
            )
            .await
            .map_err(|e| e.to_string())?;

        self.sink
            .save(&record.file_name, payload)
            .await
            .map_err(|e| format!("Failed to download file: {}", e.message))
    }

    /// End the session. The caller switches back to the login view.
    pub async fn logout(&mut self) -> AppResult<()> {
        self.notice = None;
        self.ctx.logout().await
    }

    /// The embedded upload form.
    pub fn upload(&self) -> &UploadView {
        &self.upload
    }

    /// Mutable access to the embedded upload form.
    pub fn upload_mut(&mut self) -> &mut UploadView {
        &mut self.upload
    }

    /// Records currently listed.
    pub fn records(&self) -> Vec<FileVersionRecord> {
        self.ctx.registry().snapshot()
    }

    /// Render the listing section.
    pub fn render(&self) -> String {
        let mut out = String::from("Document Manager\n");
        if let Some(notice) = &self.notice {
            let _ = writeln!(out, "{notice}");
        }

        match self.ctx.registry().status() {
            OperationStatus::Loading => {
                let _ = writeln!(out, "{LOADING_MESSAGE}");
            }
            OperationStatus::Error(message) => {
                let _ = writeln!(out, "{message}");
            }
            OperationStatus::Idle => {}
            OperationStatus::Success => {
                let records = self.ctx.registry().snapshot();
                if records.is_empty() {
                    let _ = writeln!(out, "{EMPTY_MESSAGE}");
                } else {
                    let _ = writeln!(out, "Found {} File Versions", records.len());
                    for record in &records {
                        render_record(&mut out, record);
                    }
                }
            }
        }
        out
    }
}

fn render_record(out: &mut String, record: &FileVersionRecord) {
    let _ = writeln!(out);
    let _ = writeln!(out, "File Name: {}", record.file_name);
    let _ = writeln!(
        out,
        "  ID: {} Version: {}",
        record.id, record.version_number
    );
    let _ = writeln!(out, "  Parent URL: {}", record.parent_url);
    let _ = writeln!(
        out,
        "  Created At: {}",
        record.uploaded_at_local().format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(
        out,
        "  Read: {} | Write: {}",
        permission_mark(record.can_read),
        permission_mark(record.can_write)
    );
}

impl std::fmt::Debug for FileListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileListView")
            .field("was_authenticated", &self.was_authenticated)
            .field("upload", &self.upload)
            .field("notice", &self.notice)
            .finish()
    }
}
