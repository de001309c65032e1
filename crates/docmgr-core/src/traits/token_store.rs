//! Durable key-value storage for the session credential.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for durable local key-value backends.
///
/// Values survive process restarts for persistent implementations. The
/// session store keeps exactly one entry here, keyed by a fixed name.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read the value stored under `key`. Returns `None` if absent.
    async fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}
