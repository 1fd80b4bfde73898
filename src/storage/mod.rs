//! Storage abstraction for PDFRooms.
//!
//! All persistence goes through the [`Storage`] trait, which models the
//! shared JSON key-value store: string keys, string values, no atomicity
//! across concurrent writers (last write wins on the whole value).
//! Repositories layer typed collections on top via the helpers here.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::Result;

/// Shared key-value store.
///
/// Implementations use interior mutability so repositories can share one
/// instance behind an `Arc`.
pub trait Storage: Send + Sync {
    /// Get the raw value stored under a key.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a raw value under a key, replacing any previous value.
    fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove a key and its value.
    fn remove(&self, key: &str) -> Result<()>;

    /// List all stored keys.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Read a JSON-encoded collection from storage.
///
/// A missing key or malformed stored value yields an empty collection;
/// malformed data is logged and discarded rather than surfaced as an error.
pub fn read_collection<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Vec<T>> {
    match storage.get(key)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("discarding malformed collection under '{key}': {e}");
                Ok(Vec::new())
            }
        },
        None => Ok(Vec::new()),
    }
}

/// Write a JSON-encoded collection to storage.
pub fn write_collection<T: Serialize>(storage: &dyn Storage, key: &str, items: &[T]) -> Result<()> {
    storage.set(key, serde_json::to_string(items)?)
}

/// Read a single JSON-encoded value from storage.
///
/// A missing key or malformed stored value yields `None`.
pub fn read_value<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    match storage.get(key)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("discarding malformed value under '{key}': {e}");
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

/// Write a single JSON-encoded value to storage.
pub fn write_value<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<()> {
    storage.set(key, serde_json::to_string(value)?)
}
