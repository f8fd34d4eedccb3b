//! Storage - Key/value persistence for user state.
//!
//! A minimal string key/value contract in the shape of browser local storage:
//! reads never fail (any access problem reads as "absent"), writes report
//! failures so callers can propagate them.
//!
//! ## Example
//!
//! ```ignore
//! use story_tracker::{InMemoryStorage, JsonStorage, Storage};
//!
//! let storage = InMemoryStorage::new();
//! storage.set("greeting", "\"hello\"")?;
//! let greeting: Option<String> = JsonStorage::new(storage).get("greeting");
//! ```

mod file;
mod in_memory;
mod json;

use std::fmt;
use std::sync::Arc;

/// String key/value persistence.
pub trait Storage: Send + Sync {
    /// Value for `key`, or `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every key.
    fn clear(&self) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// Error type for storage writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store cannot be used at all.
    Unavailable(String),
    /// The write would exceed the configured size limit.
    QuotaExceeded { key: String, limit: usize },
    /// Filesystem-level error.
    Io(String),
    /// Serialization/deserialization error.
    Serde(String),
    /// An internal lock was poisoned.
    LockPoisoned(&'static str),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
            StorageError::QuotaExceeded { key, limit } => write!(
                f,
                "storage quota exceeded writing {} (limit {} bytes)",
                key, limit
            ),
            StorageError::Io(msg) => write!(f, "storage io error: {}", msg),
            StorageError::Serde(msg) => write!(f, "storage serialization error: {}", msg),
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StorageError {}

pub use file::FileStorage;
pub use in_memory::InMemoryStorage;
pub use json::JsonStorage;
