//! Client configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so an absent file is valid.

pub mod api;
pub mod download;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::download::DownloadConfig;
use self::logging::LoggingConfig;
use self::session::SessionConfig;

use crate::error::{AppError, ErrorKind};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DOCMGR";

/// Root client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session persistence settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Download destination settings.
    #[serde(default)]
    pub download: DownloadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional. Values can be overridden by environment
    /// variables prefixed with `DOCMGR__` (e.g. `DOCMGR__API__BASE_URL`).
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(
                config::File::with_name(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build config: {e}"),
                    e,
                )
            })?;

        config.try_deserialize().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to deserialize config: {e}"),
                e,
            )
        })
    }

    /// Replace the configured API base address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }
}
