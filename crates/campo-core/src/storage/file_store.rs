//! JSON-file backed key-value store.
//!
//! The whole map lives in one JSON object. Every write rewrites the file
//! through a temporary sibling and a rename.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::kv::KvStore;
use crate::error::{Result, StorageError};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// # Errors
    /// Returns an error if the file exists but is not a JSON object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
                key: path.display().to_string(),
                message: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk. `self.entries` is only replaced by the
    /// caller once this succeeds.
    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            warn!(path = %self.path.display(), error = %e, "rename failed, removing temp file");
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        if !self.entries.contains_key(key) {
            return Ok(false);
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.flush(&next)?;
        self.entries = next;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("profile", "{}").unwrap();
        store.set("tasks", "[]").unwrap();
        assert!(store.delete("profile").unwrap());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("tasks").unwrap().as_deref(), Some("[]"));
        assert!(reopened.get("profile").unwrap().is_none());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nope.json")).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(FileStore::open(&path).is_err());
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("state.json");
        let mut store = FileStore::open(&path).unwrap();

        // a regular file where the parent directory should be
        std::fs::write(dir.path().join("sub"), "").unwrap();

        assert!(store.set("tasks", "[]").is_err());
        assert!(store.get("tasks").unwrap().is_none());
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn failed_rename_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("tasks", "[]").unwrap();

        // replace the file with a non-empty directory so the rename fails
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();

        assert!(store.set("profile", "{}").is_err());
        assert!(store.get("profile").unwrap().is_none());
        assert!(store.delete("tasks").is_err());
        assert_eq!(store.get("tasks").unwrap().as_deref(), Some("[]"));
        assert!(!path.with_extension("json.tmp").exists());
    }
}
