//! The key/value persistence seam.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::error::LockinError;

/// Flat string storage keyed by name.
///
/// Writes are synchronous and best-effort: there are no transactions and a
/// failed write leaves earlier values in place.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, LockinError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), LockinError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, LockinError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LockinError> {
        (**self).set(key, value)
    }
}

/// In-memory store. Clones share the same map, which lets a test simulate a
/// reload by building a second component over the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> LockinError {
        LockinError::Storage("memory store lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LockinError> {
        let values = self.values.lock().map_err(|_| Self::poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LockinError> {
        let mut values = self.values.lock().map_err(|_| Self::poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("lastWorkDate").unwrap().is_none());

        store.set("lastWorkDate", "Fri Mar 15 2024").unwrap();
        assert_eq!(
            store.get("lastWorkDate").unwrap().as_deref(),
            Some("Fri Mar 15 2024")
        );

        store.set("lastWorkDate", "Sat Mar 16 2024").unwrap();
        assert_eq!(
            store.get("lastWorkDate").unwrap().as_deref(),
            Some("Sat Mar 16 2024")
        );
        assert!(store.get("totalWorkTime").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("isRunning", "true").unwrap();
        assert_eq!(other.get("isRunning").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_rc_store_delegates() {
        let store = Rc::new(MemoryStore::new());
        let shared = Rc::clone(&store);

        shared.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
