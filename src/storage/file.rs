//! FileStorage - Key/value storage persisted as a single JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

use super::{Storage, StorageError};

/// Storage that keeps every entry in one JSON object on disk.
///
/// Each write rewrites the whole file. A missing file reads as empty; a file
/// that cannot be read or parsed reads as empty too, but writes refuse to
/// overwrite it. Clones share the same file lock.
#[derive(Clone)]
pub struct FileStorage {
    path: PathBuf,
    quota: Option<usize>,
    lock: Arc<Mutex<()>>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota: None,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Limit the size of the serialized file in bytes.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| StorageError::Serde(e.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    fn write_entries(
        &self,
        key: &str,
        entries: &BTreeMap<String, String>,
    ) -> Result<(), StorageError> {
        let contents =
            serde_json::to_string(entries).map_err(|e| StorageError::Serde(e.to_string()))?;

        if let Some(limit) = self.quota {
            if contents.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
            }
        }
        fs::write(&self.path, contents).map_err(|e| StorageError::Io(e.to_string()))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().ok()?;
        match self.read_entries() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable storage file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("file write"))?;
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(key, &entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("file remove"))?;
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(key, &entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("file clear"))?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}
