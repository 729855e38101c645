//! Key-value persistence.
//!
//! Stores hold string values under string keys. Structured state (tasks,
//! profile) goes through [`get_json`]/[`set_json`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Result, StorageError};

/// Minimal key-value store.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Returns whether a value was removed.
    fn delete(&mut self, key: &str) -> Result<bool>;
    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Decode the JSON value under `key`.
pub fn get_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
            StorageError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            }
            .into()
        }),
        None => Ok(None),
    }
}

/// Encode `value` as JSON under `key`.
pub fn set_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// In-memory store, used for tests and one-shot runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
    }

    #[test]
    fn json_helpers() {
        let mut store = MemoryStore::new();
        set_json(&mut store, "nums", &vec![1, 2, 3]).unwrap();
        let nums: Vec<u32> = get_json(&store, "nums").unwrap().unwrap();
        assert_eq!(nums, vec![1, 2, 3]);
        assert!(get_json::<Vec<u32>, _>(&store, "missing").unwrap().is_none());
    }

    #[test]
    fn corrupt_json_is_reported_with_key() {
        let mut store = MemoryStore::new();
        store.set("tasks", "{not json").unwrap();
        let err = get_json::<Vec<u32>, _>(&store, "tasks").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Storage(StorageError::Corrupt { ref key, .. }) if key == "tasks"
        ));
    }

    #[test]
    fn boxed_store_delegates() {
        let mut store: Box<dyn KvStore> = Box::new(MemoryStore::new());
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
