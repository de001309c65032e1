//! File download CLI command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use docmgr_core::config::ClientConfig;
use docmgr_core::error::AppError;
use docmgr_core::traits::download::DownloadSink;
use docmgr_gateway::{GatewayError, ListFilter};
use docmgr_state::AppContext;

use crate::output;
use crate::sink::DirectorySink;

/// Arguments for the download command
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Parent URL of the file (e.g. /documents/review.pdf)
    pub parent_url: String,

    /// Version number (latest when omitted)
    #[arg(short, long)]
    pub revision: Option<u32>,

    /// Destination directory (overrides the configured one)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the download command
///
/// The version is resolved through the listing first so the payload is
/// saved under the record's file name rather than the parent URL.
pub async fn execute(
    args: &DownloadArgs,
    ctx: Arc<AppContext>,
    config: &ClientConfig,
) -> Result<(), AppError> {
    let credential = ctx.credential();
    let filter = ListFilter {
        parent_url: Some(args.parent_url.clone()),
        revision: args.revision,
    };

    let records = match ctx.gateway().list_versions(credential.as_ref(), &filter).await {
        Ok(records) => records,
        Err(GatewayError::Unauthorized) => return Err(super::session_rejected(&ctx).await),
        Err(e) => return Err(e.into()),
    };

    let record = records
        .into_iter()
        .filter(|r| r.parent_url == args.parent_url)
        .filter(|r| args.revision.is_none_or(|rev| r.version_number == rev))
        .max_by_key(|r| r.version_number)
        .ok_or_else(|| {
            AppError::not_found(match args.revision {
                Some(rev) => format!("No version {} of '{}'", rev, args.parent_url),
                None => format!("No versions of '{}'", args.parent_url),
            })
        })?;

    println!(
        "Downloading '{}' (version {}) from {}...",
        record.file_name, record.version_number, record.parent_url
    );

    let payload = ctx
        .gateway()
        .download_version(
            credential.as_ref(),
            &record.parent_url,
            Some(record.version_number),
        )
        .await?;

    let directory = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.download.directory));
    let size = payload.len();
    let path = DirectorySink::new(directory)
        .save(&record.file_name, payload)
        .await?;

    output::print_success(&format!("Saved {} ({} bytes)", path.display(), size));
    Ok(())
}
