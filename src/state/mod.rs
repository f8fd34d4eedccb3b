//! State - The user's card ownership and story read status.
//!
//! Both are [`FlagStore`]s persisted under fixed keys of a shared [`Storage`]
//! backend. Writes to one never touch the other's key.
//!
//! ## Example
//!
//! ```ignore
//! use story_tracker::{InMemoryStorage, OwnershipStore, ReadStatusStore};
//!
//! let storage = InMemoryStorage::new();
//! let ownership = OwnershipStore::new(storage.clone());
//! let read_status = ReadStatusStore::new(storage);
//!
//! ownership.set_owned("produce-ssr-1", true)?;
//! read_status.toggle_read("ProduceCard-produce-ssr-1-story-1")?;
//! ```
//!
//! [`Storage`]: crate::storage::Storage

mod flag_store;
#[cfg(feature = "emitter")]
mod notify;

use crate::storage::{Storage, StorageError};

pub use flag_store::{FlagSet, FlagStore};
#[cfg(feature = "emitter")]
pub use notify::FlagChange;

/// Storage key for card ownership.
pub const OWNERSHIP_KEY: &str = "cardOwnership";

/// Storage key for story read status.
pub const READ_STATUS_KEY: &str = "readStatus";

/// Which cards the user owns, keyed by card id.
#[derive(Clone)]
pub struct OwnershipStore<S> {
    flags: FlagStore<S>,
}

impl<S: Storage> OwnershipStore<S> {
    /// Create the store and load persisted ownership.
    pub fn new(storage: S) -> Self {
        Self {
            flags: FlagStore::new(storage, OWNERSHIP_KEY),
        }
    }

    pub fn is_owned(&self, card_id: &str) -> bool {
        self.flags.is_set(card_id)
    }

    pub fn set_owned(&self, card_id: &str, owned: bool) -> Result<(), StorageError> {
        self.flags.set(card_id, owned)
    }

    pub fn toggle_owned(&self, card_id: &str) -> Result<(), StorageError> {
        self.flags.toggle(card_id)
    }

    pub fn all_owned_cards(&self) -> Vec<String> {
        self.flags.all()
    }

    pub fn load_ownership(&self) {
        self.flags.load()
    }

    pub fn snapshot(&self) -> FlagSet {
        self.flags.snapshot()
    }

    pub fn flags(&self) -> &FlagStore<S> {
        &self.flags
    }
}

/// Which stories the user has read, keyed by story id.
#[derive(Clone)]
pub struct ReadStatusStore<S> {
    flags: FlagStore<S>,
}

impl<S: Storage> ReadStatusStore<S> {
    /// Create the store and load persisted read status.
    pub fn new(storage: S) -> Self {
        Self {
            flags: FlagStore::new(storage, READ_STATUS_KEY),
        }
    }

    pub fn is_read(&self, story_id: &str) -> bool {
        self.flags.is_set(story_id)
    }

    pub fn set_read(&self, story_id: &str, read: bool) -> Result<(), StorageError> {
        self.flags.set(story_id, read)
    }

    pub fn toggle_read(&self, story_id: &str) -> Result<(), StorageError> {
        self.flags.toggle(story_id)
    }

    pub fn all_read_stories(&self) -> Vec<String> {
        self.flags.all()
    }

    pub fn load_read_status(&self) {
        self.flags.load()
    }

    pub fn snapshot(&self) -> FlagSet {
        self.flags.snapshot()
    }

    pub fn flags(&self) -> &FlagStore<S> {
        &self.flags
    }
}
