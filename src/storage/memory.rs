//! In-memory storage.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use super::{KeyValueStorage, StorageError};

/// Storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<FxHashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.slots.write().await.insert(key.to_string(), value);

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.write().await.remove(key);

        Ok(())
    }
}
