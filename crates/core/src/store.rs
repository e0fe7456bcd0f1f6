//! Persisted key-value store seam.
//!
//! The game only persists three scalars. Backends live outside the core
//! (see `emoji-guess-store`); [`MemoryStore`] is provided for tests and for
//! running without a writable data directory.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use crate::types::Difficulty;

pub const KEY_SCORE: &str = "score";
pub const KEY_STREAK: &str = "streak";
pub const KEY_DIFFICULTY: &str = "difficulty";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store data is malformed: {0}")]
    Malformed(String),

    #[error("store is unavailable")]
    Unavailable,
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Volatile store backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Best-effort write; failures are logged and swallowed.
pub fn write_or_warn(store: &mut dyn KeyValueStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        warn!(key, %err, "failed to persist value");
    }
}

/// Read an unsigned counter, treating missing or malformed values as absent.
pub fn read_u32(store: &dyn KeyValueStore, key: &str) -> Option<u32> {
    match store.get(key) {
        Ok(Some(raw)) => match raw.trim().parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(key, raw = %raw, "ignoring malformed persisted counter");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(key, %err, "failed to read persisted value");
            None
        }
    }
}

/// Read the persisted difficulty selection.
pub fn read_difficulty(store: &dyn KeyValueStore) -> Option<Difficulty> {
    match store.get(KEY_DIFFICULTY) {
        Ok(Some(raw)) => {
            let parsed = Difficulty::from_str(&raw);
            if parsed.is_none() {
                warn!(raw = %raw, "ignoring unknown persisted difficulty");
            }
            parsed
        }
        Ok(None) => None,
        Err(err) => {
            warn!(%err, "failed to read persisted difficulty");
            None
        }
    }
}
