// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent string key-value override store.
//!
//! The store is a flat JSON object of strings kept in the user's home
//! directory. It is independent of the resolution layers: values written here
//! are never consulted by [`LayeredConfig`](crate::service::LayeredConfig).

use crate::domain::{ConfigError, Result};
use dashmap::DashMap;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name used when the bootstrap document has no `local` key.
pub const DEFAULT_OVERRIDE_FILE: &str = "layercfg.env";

/// A string map persisted to a JSON file after every mutation.
///
/// Reads go to the in-memory map and never touch the disk. Every `set` or
/// `delete` rewrites the whole file; rewrites are serialized so the file always
/// reflects one complete state of the map.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::LocalOverrideStore;
///
/// # fn main() -> layercfg::domain::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let store = LocalOverrideStore::open(dir.path().join("overrides.env"));
///
/// store.set("k", "v")?;
/// assert_eq!(store.get("k"), "v");
/// assert_eq!(store.get("missing"), "");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LocalOverrideStore {
    /// Backing file
    path: PathBuf,
    /// In-memory state
    map: DashMap<String, String>,
    /// Serializes file rewrites
    file_lock: Mutex<()>,
}

impl LocalOverrideStore {
    /// Opens the store backed by `path`.
    ///
    /// A missing file yields an empty store. A file that cannot be read or is
    /// not a JSON object of strings also yields an empty store, logged at warn
    /// level; it is overwritten on the next mutation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = DashMap::new();

        match load_entries(&path) {
            Ok(entries) => {
                for (key, value) in entries {
                    map.insert(key, value);
                }
            }
            Err(ConfigError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Override file {} does not exist yet", path.display());
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable override file {}: {}",
                    path.display(),
                    e
                );
            }
        }

        Self {
            path,
            map,
            file_lock: Mutex::new(()),
        }
    }

    /// Returns the stored value, or the empty string.
    pub fn get(&self, key: &str) -> String {
        self.map
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Stores `value` under `key` and rewrites the file.
    ///
    /// The in-memory value is updated even when the rewrite fails.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        self.persist()
    }

    /// Removes `key` and rewrites the file.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.map.remove(key);
        self.persist()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns a sorted copy of all entries.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.map
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let _guard = self
            .file_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Snapshot under the lock so the last writer always writes the latest map
        let content = serde_json::to_string(&self.snapshot()).map_err(|e| {
            ConfigError::SourceError {
                source_name: "local-store".to_string(),
                message: "Failed to encode overrides".to_string(),
                source: Some(Box::new(e)),
            }
        })?;

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
        message: format!("Override file is not a JSON object of strings: {}", e),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> LocalOverrideStore {
        LocalOverrideStore::open(dir.path().join("overrides.env"))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.is_empty());
        assert_eq!(store.get("anything"), "");
    }

    #[test]
    fn test_set_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k"), "v");

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("k"), "v");
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_delete_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("k", "v").unwrap();
        store.set("other", "x").unwrap();
        store.delete("k").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("k"), "");
        assert_eq!(reopened.get("other"), "x");
    }

    #[test]
    fn test_delete_missing_key_still_writes() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.delete("nothing").unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{}");
    }

    #[test]
    fn test_file_is_flat_json_object() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, r#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn test_corrupt_file_is_empty_and_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("overrides.env");
        fs::write(&path, "KEY=value\n").unwrap();

        let store = LocalOverrideStore::open(&path);
        assert!(store.is_empty());

        store.set("k", "v").unwrap();
        assert_eq!(LocalOverrideStore::open(&path).get("k"), "v");
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let dir = TempDir::new().unwrap();
        let store = LocalOverrideStore::open(dir.path().join("missing-dir").join("o.env"));

        assert!(store.set("k", "v").is_err());
        assert_eq!(store.get("k"), "v");
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("z", "1").unwrap();
        store.set("a", "2").unwrap();

        let keys: Vec<_> = store.snapshot().into_keys().collect();
        assert_eq!(keys, vec!["a".to_string(), "z".to_string()]);
    }
}
