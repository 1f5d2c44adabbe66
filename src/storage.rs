// Key-value persistence for scores, streaks and the daily challenge
//
// Records are stored as JSON strings under fixed keys and always rewritten
// whole. A value that fails to parse is treated as missing.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

#[cfg(target_arch = "wasm32")]
use crate::types::PuzzleError;
use crate::types::Result;

/// Minimal string key-value store, shaped after `window.localStorage`
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// In-memory store for native hosts and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Memory store whose writes to one key fail, like a full `localStorage`
#[cfg(test)]
pub(crate) struct FailingStore {
    inner: MemoryStore,
    failing_key: String,
}

#[cfg(test)]
impl FailingStore {
    pub(crate) fn new(failing_key: &str) -> FailingStore {
        FailingStore {
            inner: MemoryStore::new(),
            failing_key: failing_key.to_string(),
        }
    }
}

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if key == self.failing_key {
            return Err(crate::types::PuzzleError::Storage("quota".to_string()));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.inner.remove_item(key)
    }
}

/// Browser `localStorage`
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Result<LocalStorage> {
        let window = web_sys::window()
            .ok_or_else(|| PuzzleError::Storage("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| PuzzleError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| PuzzleError::Storage("localStorage unavailable".to_string()))?;
        Ok(LocalStorage { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| PuzzleError::Storage(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| PuzzleError::Storage(format!("{:?}", e)))
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| PuzzleError::Storage(format!("{:?}", e)))
    }
}

/// Read and parse the record under `key`
///
/// Missing, unreadable and malformed records all come back as `None`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("failed to read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("discarding malformed {} record: {}", key, e);
            None
        }
    }
}

/// Serialize `value` and overwrite the record under `key`
pub fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw)
}
