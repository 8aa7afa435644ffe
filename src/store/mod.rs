//! Best-score persistence collaborator.
//!
//! The engine treats persistence as an injected key-value store holding
//! a single scalar (keyed by `BEST_SCORE_KEY`). Hosts back it with
//! whatever they have - browser local storage, a file, a test double.
//! A failing store never blocks gameplay: the session logs and falls
//! back to its in-memory value.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Persistence failure. Always recoverable, never fatal.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be read or written.
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}

/// Injected best-score store.
///
/// Implementations must make `save` idempotent under repeated writes
/// of the same value.
pub trait ScoreStore {
    /// Load a stored score. `Ok(None)` when nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError>;

    /// Save a score under `key`.
    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}

/// In-memory store, the default for tests and hosts without durable
/// storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    scores: FxHashMap<String, u32>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at a stored value without going through the trait.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<u32> {
        self.scores.get(key).copied()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.scores.get(key).copied())
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.scores.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();

        assert_eq!(store.load("bestScore").unwrap(), None);

        store.save("bestScore", 6).unwrap();
        assert_eq!(store.load("bestScore").unwrap(), Some(6));
        assert_eq!(store.get("bestScore"), Some(6));
    }

    #[test]
    fn test_memory_store_idempotent_save() {
        let mut store = MemoryStore::new();

        store.save("bestScore", 4).unwrap();
        store.save("bestScore", 4).unwrap();

        assert_eq!(store.load("bestScore").unwrap(), Some(4));
    }

    #[test]
    fn test_memory_store_overwrite() {
        let mut store = MemoryStore::new();

        store.save("bestScore", 6).unwrap();
        store.save("bestScore", 4).unwrap();

        assert_eq!(store.load("bestScore").unwrap(), Some(4));
    }

    #[test]
    fn test_mut_ref_delegation() {
        let mut store = MemoryStore::new();
        let mut handle = &mut store;

        handle.save("bestScore", 9).unwrap();
        assert_eq!(handle.load("bestScore").unwrap(), Some(9));
        assert_eq!(store.get("bestScore"), Some(9));
    }

    #[test]
    fn test_store_error_display() {
        let error = StoreError::Unavailable("disk full".to_string());
        assert_eq!(
            format!("{}", error),
            "score store unavailable: disk full"
        );
    }
}
