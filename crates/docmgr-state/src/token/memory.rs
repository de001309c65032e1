//! In-memory token store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use docmgr_core::result::AppResult;
use docmgr_core::traits::token_store::TokenStore;

/// Token store that lives only as long as the process.
///
/// Clones share the same entries, which lets tests inspect what a session
/// store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Read an entry without going through the async trait.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.peek(key))
    }

    async fn save(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
