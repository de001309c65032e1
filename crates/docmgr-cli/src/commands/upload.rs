//! File upload CLI command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use docmgr_core::error::AppError;
use docmgr_state::{AppContext, UploadObserver};

use crate::output;
use crate::views::UploadView;

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Parent URL grouping the versions (e.g. /documents/review.pdf)
    #[arg(short, long)]
    pub parent_url: String,
}

/// Execute the upload command
pub async fn execute(args: &UploadArgs, ctx: Arc<AppContext>) -> Result<(), AppError> {
    if !args.file.exists() {
        return Err(AppError::not_found(format!(
            "File not found: {}",
            args.file.display()
        )));
    }

    let on_upload: Arc<dyn UploadObserver> = ctx.clone();
    let mut view = UploadView::new(Arc::clone(&ctx), on_upload);
    view.file = Some(args.file.clone());
    view.parent_url = args.parent_url.clone();

    println!(
        "Uploading '{}' to {}...",
        args.file.display(),
        args.parent_url
    );

    match view.submit().await {
        Some(ack) => {
            let message = view.message().unwrap_or_default();
            match ack.record() {
                Some(record) => output::print_success(&format!(
                    "{} Stored as version {} (id: {})",
                    message, record.version_number, record.id
                )),
                None => output::print_success(message),
            }
            Ok(())
        }
        None => {
            let message = view.message().unwrap_or_default().to_string();
            output::print_error(&message);
            Err(AppError::external_service(message))
        }
    }
}
