//! Synchronous key-value storage contracts and in-process adapters.
//!
//! Every persisted slice of desktop state (window collection, theme, notes, reminders, pomodoro
//! settings) lives under its own key as JSON text. Writes to different keys never conflict and no
//! multi-key transaction is offered.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Host service for durable string values keyed by string.
pub trait KeyValueStore {
    /// Loads the raw JSON text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read.
    fn load_raw(&self, key: &str) -> Result<Option<String>, String>;

    /// Replaces the raw JSON text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unavailable or rejects the write.
    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), String>;

    /// Removes `key` from the store.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unavailable or rejects the delete.
    fn delete_raw(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op store for unsupported targets and baseline tests.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn load_raw(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save_raw(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete_raw(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store keyed by string. Clones share the same map.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Returns the number of keys currently stored.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when no key is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete_raw(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed value through a [`KeyValueStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store read or JSON deserialization fails.
pub fn load_typed_with<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_raw(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed value through a [`KeyValueStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_typed_with<S: KeyValueStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_raw(key, &raw)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        sound_enabled: bool,
    }

    #[test]
    fn memory_store_round_trip_and_delete() {
        let store = MemoryKeyValueStore::default();
        let store_obj: &dyn KeyValueStore = &store;

        store_obj.save_raw("k", "{\"v\":1}").expect("save");
        assert_eq!(
            store_obj.load_raw("k").expect("load"),
            Some("{\"v\":1}".to_string())
        );
        store_obj.delete_raw("k").expect("delete");
        assert_eq!(store_obj.load_raw("k").expect("load"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn memory_store_clones_share_contents() {
        let store = MemoryKeyValueStore::default();
        let other = store.clone();
        store.save_raw("theme", "\"dark\"").expect("save");
        assert_eq!(
            other.load_raw("theme").expect("load"),
            Some("\"dark\"".to_string())
        );
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn typed_helpers_round_trip() {
        let store = MemoryKeyValueStore::default();
        save_typed_with(
            &store,
            "settings",
            &Settings {
                sound_enabled: true,
            },
        )
        .expect("save typed");

        let loaded: Option<Settings> = load_typed_with(&store, "settings").expect("load typed");
        assert_eq!(
            loaded,
            Some(Settings {
                sound_enabled: true
            })
        );
    }

    #[test]
    fn typed_load_reports_malformed_json() {
        let store = MemoryKeyValueStore::default();
        store.save_raw("settings", "{not json").expect("save");
        let loaded = load_typed_with::<_, Settings>(&store, "settings");
        assert!(loaded.is_err());
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopKeyValueStore;
        assert_eq!(store.load_raw("k").expect("load"), None);
        store.save_raw("k", "{}").expect("save");
        store.delete_raw("k").expect("delete");
    }
}
