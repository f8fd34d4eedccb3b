//! InMemoryStorage - HashMap-backed storage for tests and hosts without persistence.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Storage, StorageError};

/// In-memory key/value storage.
///
/// Clone-friendly via Arc; clones share the same entries, so the ownership and
/// read-status stores can be handed the same backend.
#[derive(Clone)]
pub struct InMemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
    available: bool,
    quota: Option<usize>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            available: true,
            quota: None,
        }
    }

    /// A storage that is switched off: reads return `None`, writes fail with
    /// [`StorageError::Unavailable`].
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Limit the total size (keys plus values, in bytes) of stored entries.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable("in-memory storage disabled".into()))
        }
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        let entries = self.entries.read().ok()?;
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned("remove"))?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.ensure_available()?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned("clear"))?;
        entries.clear();
        Ok(())
    }
}
