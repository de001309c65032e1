//! CLI command definitions and dispatch.

pub mod config;
pub mod download;
pub mod list;
pub mod login;
pub mod logout;
pub mod shell;
pub mod status;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use docmgr_core::config::ClientConfig;
use docmgr_core::error::AppError;
use docmgr_core::traits::token_store::TokenStore;
use docmgr_gateway::{DocumentGateway, HttpGateway};
use docmgr_state::AppContext;
use docmgr_state::token::FileTokenStore;

use crate::output::OutputFormat;

/// Document Manager: browse, download, and upload versioned documents
#[derive(Debug, Parser)]
#[command(name = "docmgr", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Backend API base address (overrides the configuration file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive session (login, list, upload, download)
    Shell,
    /// Log in and remember the session
    Login(login::LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show session status
    Status,
    /// List file versions
    List(list::ListArgs),
    /// Show one file version
    Show(list::ShowArgs),
    /// Download a file version
    Download(download::DownloadArgs),
    /// Upload a new file version
    Upload(upload::UploadArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Load configuration and apply command-line overrides
    pub fn load_config(&self) -> Result<ClientConfig, AppError> {
        let config = ClientConfig::load(&self.config)?;
        Ok(match &self.base_url {
            Some(base_url) => config.with_base_url(base_url.clone()),
            None => config,
        })
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: ClientConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Shell => shell::execute(connect(&config).await?, &config).await,
            Commands::Login(args) => login::execute(args, connect(&config).await?).await,
            Commands::Logout => logout::execute(connect(&config).await?).await,
            Commands::Status => status::execute(connect(&config).await?, &config).await,
            Commands::List(args) => list::execute(args, connect(&config).await?, self.format).await,
            Commands::Show(args) => list::show(args, connect(&config).await?, self.format).await,
            Commands::Download(args) => {
                download::execute(args, connect(&config).await?, &config).await
            }
            Commands::Upload(args) => upload::execute(args, connect(&config).await?).await,
            Commands::Config(args) => config::execute(args, &self.config, &config, self.format).await,
        }
    }
}

/// Helper: build the context and restore any persisted session
pub async fn connect(config: &ClientConfig) -> Result<Arc<AppContext>, AppError> {
    let ctx = build_context(config)?;
    ctx.restore().await?;
    Ok(ctx)
}

/// Helper: wire the HTTP gateway and file token store into a context
pub fn build_context(config: &ClientConfig) -> Result<Arc<AppContext>, AppError> {
    let gateway: Arc<dyn DocumentGateway> = Arc::new(HttpGateway::new(&config.api)?);
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.session.store_dir));
    Ok(Arc::new(AppContext::new(
        gateway,
        store,
        config.session.token_key.clone(),
    )))
}

/// Helper: turn a rejected session into a command error after logging out
pub(crate) async fn session_rejected(ctx: &AppContext) -> AppError {
    if let Err(e) = ctx.logout().await {
        tracing::warn!(error = %e, "Failed to clear persisted session");
    }
    AppError::authorization("Session expired or invalid. Please log in again.")
}
