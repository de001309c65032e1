//! File version listing CLI commands.

use std::borrow::Cow;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use docmgr_core::error::AppError;
use docmgr_entity::file::FileVersionRecord;
use docmgr_gateway::{GatewayError, ListFilter};
use docmgr_state::{AppContext, RefreshOutcome};

use crate::output::{self, OutputFormat, permission_mark};
use crate::views::file_list::EMPTY_MESSAGE;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only versions of this parent URL
    #[arg(short, long)]
    pub parent_url: Option<String>,

    /// Only this version number
    #[arg(short, long)]
    pub revision: Option<u32>,
}

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// File version ID
    pub id: String,
}

/// File version display row.
///
/// Permissions serialize as booleans; the table shows them as glyphs.
#[derive(Debug, Serialize)]
pub struct FileVersionRow {
    /// ID
    id: String,
    /// File name
    file_name: String,
    /// Version
    version: u32,
    /// Parent URL
    parent_url: String,
    /// Created at (local time)
    created_at: String,
    /// Read
    read: bool,
    /// Write
    write: bool,
}

impl Tabled for FileVersionRow {
    const LENGTH: usize = 7;

    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.file_name.as_str()),
            Cow::Owned(self.version.to_string()),
            Cow::Borrowed(self.parent_url.as_str()),
            Cow::Borrowed(self.created_at.as_str()),
            Cow::Borrowed(permission_mark(self.read)),
            Cow::Borrowed(permission_mark(self.write)),
        ]
    }

    fn headers() -> Vec<Cow<'static, str>> {
        ["ID", "File Name", "Version", "Parent URL", "Created At", "Read", "Write"]
            .into_iter()
            .map(Cow::Borrowed)
            .collect()
    }
}

impl From<&FileVersionRecord> for FileVersionRow {
    fn from(record: &FileVersionRecord) -> Self {
        Self {
            id: record.id.clone(),
            file_name: record.file_name.clone(),
            version: record.version_number,
            parent_url: record.parent_url.clone(),
            created_at: record
                .uploaded_at_local()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            read: record.can_read,
            write: record.can_write,
        }
    }
}

/// Execute the list command
pub async fn execute(
    args: &ListArgs,
    ctx: Arc<AppContext>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let filter = ListFilter {
        parent_url: args.parent_url.clone(),
        revision: args.revision,
    };

    let records = if filter.is_empty() {
        match ctx.refresh().await {
            RefreshOutcome::Loaded(_) | RefreshOutcome::Superseded => ctx.registry().snapshot(),
            RefreshOutcome::Unauthorized => {
                return Err(AppError::authorization(
                    "Session expired or invalid. Please log in again.",
                ));
            }
            RefreshOutcome::Failed(e) => return Err(e.into()),
        }
    } else {
        let credential = ctx.credential();
        match ctx
            .gateway()
            .list_versions(credential.as_ref(), &filter)
            .await
        {
            Ok(records) => records,
            Err(GatewayError::Unauthorized) => return Err(super::session_rejected(&ctx).await),
            Err(e) => return Err(e.into()),
        }
    };

    let rows: Vec<FileVersionRow> = records.iter().map(FileVersionRow::from).collect();
    if format == OutputFormat::Table && !rows.is_empty() {
        println!("Found {} File Versions", rows.len());
    }
    output::print_list(&rows, format, EMPTY_MESSAGE);
    Ok(())
}

/// Execute the show command
pub async fn show(args: &ShowArgs, ctx: Arc<AppContext>, format: OutputFormat) -> Result<(), AppError> {
    let credential = ctx.credential();
    let record = match ctx.gateway().get_version(credential.as_ref(), &args.id).await {
        Ok(record) => record,
        Err(GatewayError::Unauthorized) => return Err(super::session_rejected(&ctx).await),
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Json => output::print_item(&record, format),
        OutputFormat::Table => {
            println!("File Name: {}", record.file_name);
            output::print_kv("ID", &record.id);
            output::print_kv("Version", &record.version_number.to_string());
            output::print_kv("Parent URL", &record.parent_url);
            output::print_kv(
                "Created At",
                &record.uploaded_at_local().format("%Y-%m-%d %H:%M:%S").to_string(),
            );
            output::print_kv("Read", permission_mark(record.can_read));
            output::print_kv("Write", permission_mark(record.can_write));
            if let Some(hash) = &record.content_hash {
                output::print_kv("SHA-256", hash);
            }
        }
    }
    Ok(())
}
