use crate::core::kv::KeyValueStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION_NAME: &str = "expense_manager";

/// Store backed by a single fjall partition. Every write is synced to disk
/// before returning.
pub struct DiskStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create store directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open keyspace at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION_NAME, PartitionCreateOptions::default())
            .context("Failed to open store partition")?;
        debug!(path = %path.display(), "Opened disk store");

        Ok(Self {
            keyspace,
            partition,
        })
    }

    fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist keyspace")
    }
}

#[async_trait]
impl KeyValueStore for DiskStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let Some(raw) = self
            .partition
            .get(key.as_bytes())
            .with_context(|| format!("Failed to read key {key}"))?
        else {
            debug!(key, "Disk store MISS");
            return Ok(None);
        };

        let value = String::from_utf8(raw.to_vec())
            .with_context(|| format!("Value for key {key} is not valid UTF-8"))?;
        debug!(key, "Disk store HIT");
        Ok(Some(value))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.partition
            .insert(key.as_bytes(), value.as_bytes())
            .with_context(|| format!("Failed to write key {key}"))?;
        self.persist()?;
        debug!(key, "Disk store SET");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.partition
            .remove(key.as_bytes())
            .with_context(|| format!("Failed to remove key {key}"))?;
        self.persist()?;
        debug!(key, "Disk store REMOVE");
        Ok(())
    }
}
