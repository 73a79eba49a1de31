//! Paper details stash
//!
//! Mirrors an opaque `paperDetails` JSON object to a key/value store: read
//! once when mounted, written on every change. The question paper tree is
//! never stored here.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::events::{Event, EventBus};
use crate::store::KeyValueStore;

/// Default storage key
pub const PAPER_DETAILS_KEY: &str = "paperDetails";

/// Opaque paper details mirrored to storage
pub struct PaperDetailsStash<S: KeyValueStore> {
    store: S,
    key: String,
    value: Value,
    events: Option<Arc<EventBus>>,
}

impl<S: KeyValueStore> PaperDetailsStash<S> {
    /// Create a stash under the default key; nothing is read until `load`
    pub fn new(store: S) -> Self {
        Self::with_key(store, PAPER_DETAILS_KEY)
    }

    /// Create a stash under a custom key
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            value: Value::Null,
            events: None,
        }
    }

    /// Publish stash events on the given bus
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    /// Read the stored value, keeping `Null` when the key is absent
    pub fn load(&mut self) -> Result<&Value> {
        if let Some(raw) = self.store.get(&self.key)? {
            debug!("Loaded {} ({} bytes)", self.key, raw.len());
            self.value = serde_json::from_str(&raw)?;
        }
        self.emit(Event::StashLoaded);
        Ok(&self.value)
    }

    /// Current value
    pub fn get(&self) -> &Value {
        &self.value
    }

    /// Replace the value and write it through to storage
    pub fn set(&mut self, value: Value) -> Result<()> {
        let raw = serde_json::to_string(&value)?;
        if let Err(err) = self.store.set(&self.key, &raw) {
            warn!("Failed to write {}: {}", self.key, err);
            return Err(err);
        }
        self.value = value;
        self.emit(Event::StashUpdated);
        Ok(())
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}
