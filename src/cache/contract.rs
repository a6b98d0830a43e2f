use crate::error::CacheError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One key/value pair of a cache write.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub value: Value,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Key-value cache interface
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Write every entry or none of them.
    fn save(&self, entries: &[CacheEntry]) -> Result<(), CacheError>;
}

/// Read `key` and decode it into `T`.
pub fn get_typed<T: DeserializeOwned>(
    store: &dyn CacheStore,
    key: &str,
) -> Result<Option<T>, CacheError> {
    match store.get(key)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| CacheError::Codec {
                key: key.to_string(),
                source,
            }),
    }
}
