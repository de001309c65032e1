//! Backend API configuration.

use serde::{Deserialize, Serialize};

/// Document backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address all endpoints are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8001/api".to_string()
}

fn default_user_agent() -> String {
    format!("docmgr/{}", env!("CARGO_PKG_VERSION"))
}
