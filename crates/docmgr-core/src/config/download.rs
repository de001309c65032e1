//! Download destination configuration.

use serde::{Deserialize, Serialize};

/// Settings for saving downloaded file versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory downloaded payloads are written into.
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> String {
    "downloads".to_string()
}
