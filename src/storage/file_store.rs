//! File-backed storage: one JSON object of string keys to string values

use super::{KeyValueStore, StorageError};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used inside the data directory
const STORAGE_FILE: &str = "storage.json";

/// Key-value store persisted as a JSON document on disk.
///
/// The whole document is rewritten on every mutation, so the file always
/// reflects the last completed `set`/`remove`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Default data directory for the application
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("io", "accessible-form", "accessible-form")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Open (or lazily create) the store inside `dir`.
    ///
    /// An unreadable or corrupt document is treated as empty; the next
    /// write replaces it.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORAGE_FILE);
        let entries = if path.exists() {
            Self::read_entries(&path)
        } else {
            BTreeMap::new()
        };

        Self { path, entries }
    }

    fn read_entries(path: &Path) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Ignoring unreadable storage file {}: {err}", path.display());
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("Ignoring corrupt storage file {}: {err}", path.display());
                BTreeMap::new()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path());
        assert_eq!(store.get("formProgress").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path());
            store.set("fontSize", "20").unwrap();
            store.set("reducedMotion", "true").unwrap();
        }

        let store = FileStore::open(dir.path());
        assert_eq!(store.get("fontSize").unwrap().as_deref(), Some("20"));
        assert_eq!(store.get("reducedMotion").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path());
            store.set("formProgress", "{}").unwrap();
            store.remove("formProgress").unwrap();
        }

        let store = FileStore::open(dir.path());
        assert_eq!(store.get("formProgress").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORAGE_FILE), "not json").unwrap();

        let mut store = FileStore::open(dir.path());
        assert_eq!(store.get("fontSize").unwrap(), None);

        store.set("fontSize", "14").unwrap();
        let reopened = FileStore::open(dir.path());
        assert_eq!(reopened.get("fontSize").unwrap().as_deref(), Some("14"));
    }

    #[test]
    fn test_non_utf8_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORAGE_FILE), [0xff, 0xfe, 0x7b]).unwrap();

        let mut store = FileStore::open(dir.path());
        assert_eq!(store.get("formProgress").unwrap(), None);

        store.set("formProgress", "{}").unwrap();
        let reopened = FileStore::open(dir.path());
        assert_eq!(reopened.get("formProgress").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = FileStore::open(&nested);
        store.set("highContrast", "false").unwrap();
        assert!(nested.join(STORAGE_FILE).exists());
    }
}
