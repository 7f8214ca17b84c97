//! Durable key-value storage.
//!
//! Answer sessions and the API credential are both kept as plain strings
//! under well-known keys. Consumers receive the store as an injected
//! `Arc<dyn KeyValueStore>`; nothing reaches for a global.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::StorageResult;

/// String-keyed storage with whole-value reads and writes.
///
/// There is no partial or transactional update: every write replaces the
/// previous value for the key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// All keys starting with `prefix`, sorted.
    async fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>>;
}
