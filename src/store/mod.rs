pub mod disk;
pub mod memory;

use crate::core::config::{AppConfig, StoreKind};
use crate::core::kv::KeyValueStore;
use anyhow::Result;
pub use disk::DiskStore;
pub use memory::MemoryStore;
use std::sync::Arc;
use tracing::debug;

/// Opens the store selected by the configuration.
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.store {
        StoreKind::Disk => {
            let path = config.data_dir()?.join("store");
            debug!(path = %path.display(), "Using disk store");
            Ok(Arc::new(DiskStore::open(&path)?))
        }
        StoreKind::Memory => {
            debug!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
