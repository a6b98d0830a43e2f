//! Cache Store
//!
//! Key-value persistence for the selected workspace and its command catalog.
//! Values are JSON; [`CacheStore::save`] writes a batch of entries atomically.

pub mod contract;
pub mod memory;
pub mod persistence;

pub use contract::{get_typed, CacheEntry, CacheStore};
pub use memory::MemoryCacheStore;
pub use persistence::{LazySledCacheStore, SledCacheStore};
