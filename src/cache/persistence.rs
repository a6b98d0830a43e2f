//! Sled-backed cache store.

use crate::cache::{CacheEntry, CacheStore};
use crate::error::CacheError;
use parking_lot::Mutex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const TREE_NAME: &str = "yarnspace-cache";

/// Persistent cache store; batches are applied with `Tree::apply_batch`.
pub struct SledCacheStore {
    tree: sled::Tree,
}

impl SledCacheStore {
    /// Open (or create) the cache database at `path`.
    pub fn open(path: &Path) -> Result<Self, CacheError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Self::from_db(&db)
    }

    pub fn from_db(db: &sled::Db) -> Result<Self, CacheError> {
        Ok(Self {
            tree: db.open_tree(TREE_NAME)?,
        })
    }
}

impl CacheStore for SledCacheStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        match self.tree.get(key.as_bytes())? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|source| CacheError::Codec {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn save(&self, entries: &[CacheEntry]) -> Result<(), CacheError> {
        let mut batch = sled::Batch::default();
        for entry in entries {
            let bytes = serde_json::to_vec(&entry.value).map_err(|source| CacheError::Codec {
                key: entry.key.clone(),
                source,
            })?;
            batch.insert(entry.key.as_bytes(), bytes);
        }
        self.tree.apply_batch(batch)?;
        self.tree.flush()?;
        debug!(entries = entries.len(), "cache batch saved");
        Ok(())
    }
}

/// Sled store that is opened on first access.
///
/// Commands that never read or write the selection leave the database (and
/// its directory) untouched.
pub struct LazySledCacheStore {
    path: PathBuf,
    store: Mutex<Option<Arc<SledCacheStore>>>,
}

impl LazySledCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            store: Mutex::new(None),
        }
    }

    /// Whether the database has been opened yet.
    pub fn is_open(&self) -> bool {
        self.store.lock().is_some()
    }

    fn store(&self) -> Result<Arc<SledCacheStore>, CacheError> {
        let mut slot = self.store.lock();
        if let Some(store) = slot.as_ref() {
            return Ok(Arc::clone(store));
        }
        debug!(path = %self.path.display(), "opening cache database");
        let store = Arc::new(SledCacheStore::open(&self.path)?);
        *slot = Some(Arc::clone(&store));
        Ok(store)
    }
}

impl CacheStore for LazySledCacheStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        self.store()?.get(key)
    }

    fn save(&self, entries: &[CacheEntry]) -> Result<(), CacheError> {
        self.store()?.save(entries)
    }
}
