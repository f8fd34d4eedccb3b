use event_emitter_rs::EventEmitter;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Payload delivered to change listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagChange {
    /// Storage key of the store that changed (`cardOwnership` or `readStatus`).
    pub key: String,
    pub id: String,
    pub value: bool,
}

/// Shared emitter for one store. Listeners run on the emitter's own threads.
#[derive(Clone)]
pub(crate) struct ChangeNotifier {
    emitter: Arc<Mutex<EventEmitter>>,
}

impl ChangeNotifier {
    pub(crate) fn new() -> Self {
        Self {
            emitter: Arc::new(Mutex::new(EventEmitter::new())),
        }
    }

    pub(crate) fn subscribe<F>(&self, event: &str, listener: F) -> String
    where
        F: Fn(FlagChange) + Send + Sync + 'static,
    {
        let mut emitter = self.emitter.lock().unwrap_or_else(PoisonError::into_inner);
        emitter.on(event, listener)
    }

    pub(crate) fn notify(&self, change: FlagChange) {
        let event = change.key.clone();
        let mut emitter = self.emitter.lock().unwrap_or_else(PoisonError::into_inner);
        emitter.emit(&event, change);
    }
}
