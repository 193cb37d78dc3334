//! In-process backends.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{KeyValueStore, StoreError};

/// An in-memory [`KeyValueStore`].
///
/// Cloning a `MemoryStore` shares the underlying map, the same way two
/// browser tabs share one local storage area. Hand a clone to a second
/// console to simulate another tab writing the same keys.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock can't leave the map half-written
    // (every operation is a single insert/remove), so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// A backend standing in for storage that has been disabled.
///
/// Every read is absent and every write fails with
/// [`StoreError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(format!("cannot write {key}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(format!("cannot remove {key}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_set_then_get_returns_value() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("missing").is_ok());
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_clone_shares_entries() {
        // Two "tabs" over the same storage area.
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.clone();
        tab_a.set("k", "from-a").unwrap();
        assert_eq!(tab_b.get("k").as_deref(), Some("from-a"));
        tab_b.remove("k").unwrap();
        assert_eq!(tab_a.get("k"), None);
    }

    #[test]
    fn test_disabled_reads_absent_and_rejects_writes() {
        let store = DisabledStore;
        assert_eq!(store.get("anything"), None);
        assert!(matches!(
            store.set("k", "v"),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.remove("k"), Err(StoreError::Unavailable(_))));
    }
}
