// ── In-process storage ──

use std::sync::Arc;

use dashmap::DashMap;

use super::{DEFAULT_STORAGE_KEY, StateStorage, StorageError, encode};
use crate::store::InventoryState;

/// Snapshot storage backed by a shared in-memory map.
///
/// Clones share the same map, so a store re-opened on a clone sees what
/// the previous one saved.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    entries: Arc<DashMap<String, String>>,
    key: String,
}

impl MemoryStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            key: key.into(),
        }
    }

    /// A view of the same map under a different namespace key.
    #[cfg(test)]
    pub(crate) fn scoped(&self, key: impl Into<String>) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            key: key.into(),
        }
    }

    /// Raw JSON stored under this key, if any.
    pub fn raw(&self) -> Option<String> {
        self.entries.get(&self.key).map(|text| text.value().clone())
    }

    /// Overwrite the raw text under this key, bypassing encoding.
    pub fn put_raw(&self, text: impl Into<String>) {
        self.entries.insert(self.key.clone(), text.into());
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_KEY)
    }
}

impl StateStorage for MemoryStorage {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.raw())
    }

    fn save(&self, state: &InventoryState) -> Result<(), StorageError> {
        let text = encode(state)?;
        self.entries.insert(self.key.clone(), text);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries.remove(&self.key);
        Ok(())
    }
}
