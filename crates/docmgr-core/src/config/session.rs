//! Session persistence configuration.

use serde::{Deserialize, Serialize};

/// Where and under which key the session credential is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the durable key-value entries.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,
    /// Fixed key the credential is stored under.
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            token_key: default_token_key(),
        }
    }
}

fn default_store_dir() -> String {
    "data/session".to_string()
}

fn default_token_key() -> String {
    "token".to_string()
}
