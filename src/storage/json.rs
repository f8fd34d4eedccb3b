//! JsonStorage - Typed JSON values on top of any [`Storage`].

use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

use super::{Storage, StorageError};

/// Typed wrapper that stores values as JSON strings.
#[derive(Clone)]
pub struct JsonStorage<S> {
    storage: S,
}

impl<S: Storage> JsonStorage<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn inner(&self) -> &S {
        &self.storage
    }

    /// Decode the value under `key`. Missing, empty, and undecodable values
    /// all read as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get(key)?;
        if raw.is_empty() {
            return None;
        }
        serde_json::from_str(&raw).ok()
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(value).map_err(|e| StorageError::Serde(e.to_string()))?;
        self.storage.set(key, &encoded).map_err(|e| {
            error!(key, error = %e, "failed to write storage key");
            e
        })
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove(key).map_err(|e| {
            error!(key, error = %e, "failed to remove storage key");
            e
        })
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.clear().map_err(|e| {
            error!(error = %e, "failed to clear storage");
            e
        })
    }

    /// Whether `key` holds a non-empty value.
    pub fn has(&self, key: &str) -> bool {
        self.storage
            .get(key)
            .map(|raw| !raw.is_empty())
            .unwrap_or(false)
    }
}
