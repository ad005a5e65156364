//! Local Persistence Port
//!
//! Key-based string storage behind a trait so widgets never touch
//! `localStorage` directly. The browser adapter and the in-memory fake
//! implement the same interface; tests run entirely against the fake.

use std::collections::HashMap;
use std::sync::Mutex;

/// Storage key for the serialized to-do array (JSON).
pub const TODOS_KEY: &str = "todos";
/// Storage key for the serialized notes document (raw HTML string).
pub const NOTES_KEY: &str = "dashboard_notes";
/// Storage key for the weather API key (plain string).
pub const API_KEY_KEY: &str = "weatherApiKey";

/// Persistence-level errors
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Local storage is disabled or missing in this browsing context
    Unavailable,
    /// The backend rejected the write (quota exceeded, etc.)
    WriteFailed(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "local storage is unavailable"),
            StoreError::WriteFailed(msg) => write!(f, "storage write failed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Key-based string storage port shared by all widgets.
///
/// Each widget owns its own key; values are opaque strings (JSON or raw
/// HTML). Writes always replace the full value, last writer wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str);
}

/// `window.localStorage` adapter.
///
/// Holds no state of its own; the `Storage` handle is re-resolved per
/// call because the handle itself is not thread-safe to cache.
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }

    /// Whether local storage can be used at all in this context
    pub fn available() -> bool {
        Self::storage().is_some()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|err| {
            let msg = err
                .as_string()
                .unwrap_or_else(|| "storage rejected the write".to_string());
            StoreError::WriteFailed(msg)
        })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store: the test fake, and the runtime fallback when local
/// storage is disabled (state survives until the page is closed).
#[derive(Debug, Default)]
pub struct MemStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok().and_then(|map| map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self
            .entries
            .lock()
            .map_err(|_| StoreError::WriteFailed("store lock poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.entries.lock() {
            map.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_store_round_trip() {
        let store = MemStore::default();
        assert_eq!(store.get("k"), None);

        store.set("k", "v1").unwrap();
        assert_eq!(store.get("k"), Some("v1".to_string()));

        // Full-value overwrite, last writer wins
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k"), Some("v2".to_string()));

        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = MemStore::default();
        store.set(TODOS_KEY, "[]").unwrap();
        store.set(NOTES_KEY, "<div></div>").unwrap();

        store.remove(TODOS_KEY);
        assert_eq!(store.get(NOTES_KEY), Some("<div></div>".to_string()));
    }
}
