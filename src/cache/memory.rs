//! In-process cache store.

use crate::cache::{CacheEntry, CacheStore};
use crate::error::CacheError;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Cache store kept in memory; nothing outlives the process.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, Value>>,
    batches: RwLock<usize>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` batches applied so far.
    pub fn batches_written(&self) -> usize {
        *self.batches.read()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn save(&self, entries: &[CacheEntry]) -> Result<(), CacheError> {
        let mut map = self.entries.write();
        for entry in entries {
            map.insert(entry.key.clone(), entry.value.clone());
        }
        *self.batches.write() += 1;
        Ok(())
    }
}
