//! FlagStore - A persisted set of ids flagged `true`.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

use crate::storage::{JsonStorage, Storage, StorageError};

#[cfg(feature = "emitter")]
use super::notify::{ChangeNotifier, FlagChange};

/// Ids currently flagged `true`, as captured by [`FlagStore::snapshot`].
pub type FlagSet = HashSet<String>;

/// A key -> `true` mapping persisted under a single storage key.
///
/// Absence of an id means `false`; setting an id to `false` deletes it, so the
/// persisted JSON object only ever contains `true` entries. Every write is
/// persisted before it returns.
///
/// Clone-friendly via Arc; clones share the in-memory state.
#[derive(Clone)]
pub struct FlagStore<S> {
    key: &'static str,
    storage: JsonStorage<S>,
    flags: Arc<RwLock<FlagSet>>,
    #[cfg(feature = "emitter")]
    notifier: ChangeNotifier,
}

impl<S: Storage> FlagStore<S> {
    /// Create a store over `storage` and load whatever is persisted under `key`.
    pub fn new(storage: S, key: &'static str) -> Self {
        let store = Self {
            key,
            storage: JsonStorage::new(storage),
            flags: Arc::new(RwLock::new(FlagSet::new())),
            #[cfg(feature = "emitter")]
            notifier: ChangeNotifier::new(),
        };
        store.load();
        store
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// (Re)load from storage. Missing or malformed data loads as empty.
    pub fn load(&self) {
        let loaded = match self.storage.inner().get(self.key) {
            None => FlagSet::new(),
            Some(raw) if raw.is_empty() => FlagSet::new(),
            Some(raw) => match serde_json::from_str::<Map<String, Value>>(&raw) {
                // Only a literal `true` counts; other values are treated as unset.
                Ok(map) => map
                    .into_iter()
                    .filter_map(|(id, flag)| matches!(flag, Value::Bool(true)).then_some(id))
                    .collect(),
                Err(e) => {
                    warn!(key = self.key, error = %e, "malformed persisted flags, starting empty");
                    FlagSet::new()
                }
            },
        };

        debug!(key = self.key, entries = loaded.len(), "loaded flags");
        match self.flags.write() {
            Ok(mut flags) => *flags = loaded,
            Err(poisoned) => *poisoned.into_inner() = loaded,
        }
    }

    /// Whether `id` is flagged. Never fails.
    pub fn is_set(&self, id: &str) -> bool {
        self.flags
            .read()
            .map(|flags| flags.contains(id))
            .unwrap_or(false)
    }

    /// Flag or unflag `id`, then persist the whole mapping.
    ///
    /// The in-memory change is kept even if persisting fails.
    pub fn set(&self, id: &str, value: bool) -> Result<(), StorageError> {
        let persisted = {
            let mut flags = self
                .flags
                .write()
                .map_err(|_| StorageError::LockPoisoned("flag write"))?;
            if value {
                flags.insert(id.to_string());
            } else {
                flags.remove(id);
            }
            to_persisted(&flags)
        };

        self.storage.set(self.key, &persisted)?;

        #[cfg(feature = "emitter")]
        self.notifier.notify(FlagChange {
            key: self.key.to_string(),
            id: id.to_string(),
            value,
        });

        Ok(())
    }

    pub fn toggle(&self, id: &str) -> Result<(), StorageError> {
        self.set(id, !self.is_set(id))
    }

    /// Every flagged id, in no particular order.
    pub fn all(&self) -> Vec<String> {
        self.flags
            .read()
            .map(|flags| flags.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// A point-in-time copy of the flagged ids.
    pub fn snapshot(&self) -> FlagSet {
        self.flags
            .read()
            .map(|flags| flags.clone())
            .unwrap_or_default()
    }

    /// Register a listener called after each successful persisted write.
    #[cfg(feature = "emitter")]
    pub fn on_change<F>(&self, listener: F) -> String
    where
        F: Fn(FlagChange) + Send + Sync + 'static,
    {
        self.notifier.subscribe(self.key, listener)
    }
}

fn to_persisted(flags: &FlagSet) -> BTreeMap<String, bool> {
    flags.iter().map(|id| (id.clone(), true)).collect()
}
