use std::{path::Path, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use shared::domain::{Cylinder, DeliveryRecord};

pub mod error;
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

pub const INVENTORY_KEY: &str = "cylinder_inventory";
pub const HISTORY_KEY: &str = "delivery_history";

/// Typed access to the two persisted collections.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// File-backed storage rooted at `data_dir`, created if missing.
    pub fn open(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self::new(Arc::new(FileStore::open(data_dir)?)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn load_inventory(&self) -> Vec<Cylinder> {
        self.load_list(INVENTORY_KEY)
    }

    pub fn save_inventory(&self, inventory: &[Cylinder]) -> StorageResult<()> {
        self.save_list(INVENTORY_KEY, inventory)
    }

    pub fn load_history(&self) -> Vec<DeliveryRecord> {
        self.load_list(HISTORY_KEY)
    }

    pub fn save_history(&self, history: &[DeliveryRecord]) -> StorageResult<()> {
        self.save_list(HISTORY_KEY, history)
    }

    /// Raw document for `key`, used to restore a previous state after a failed write.
    pub fn snapshot(&self, key: &str) -> StorageResult<Option<String>> {
        self.backend.get(key)
    }

    pub fn restore(&self, key: &str, snapshot: Option<&str>) -> StorageResult<()> {
        match snapshot {
            Some(raw) => self.backend.set(key, raw),
            None => self.backend.remove(key),
        }
    }

    /// Removes both persisted entries. If the history cannot be removed the
    /// inventory document is put back, so a failed clear leaves both in place.
    pub fn clear(&self) -> StorageResult<()> {
        let inventory = self.snapshot(INVENTORY_KEY)?;
        self.backend.remove(INVENTORY_KEY)?;
        if let Err(err) = self.backend.remove(HISTORY_KEY) {
            if let Err(restore_err) = self.restore(INVENTORY_KEY, inventory.as_deref()) {
                error!(%restore_err, "failed to restore inventory after an aborted clear");
            }
            return Err(err);
        }
        Ok(())
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!(key, %err, "failed to read persisted collection; starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                debug!(key, count = items.len(), "loaded persisted collection");
                items
            }
            Err(err) => {
                error!(key, %err, "failed to parse persisted collection; starting empty");
                Vec::new()
            }
        }
    }

    fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> StorageResult<()> {
        let raw = serde_json::to_string(items).map_err(|source| StorageError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &raw)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
