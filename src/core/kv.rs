//! Key-value storage abstraction

use anyhow::Result;
use async_trait::async_trait;

/// A persistent namespace of string keys holding serialized string values.
///
/// Implementations only promise single-key durability; nothing spans keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;
}
