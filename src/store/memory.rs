use crate::core::kv::KeyValueStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory store using a HashMap behind an async Mutex. Contents are lost
/// when the last handle is dropped.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.inner.lock().await;
        let value = items.get(key).cloned();
        debug!(key, found = value.is_some(), "Memory store GET");
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.inner.lock().await;
        debug!(key, "Memory store SET");
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.inner.lock().await;
        items.remove(key);
        debug!(key, "Memory store REMOVE");
        Ok(())
    }
}
