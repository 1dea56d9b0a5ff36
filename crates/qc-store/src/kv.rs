//! Key-value storage backends

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::debug;
use qc_types::StoreError;

/// Synchronous key-value storage of opaque byte snapshots.
///
/// There is no transaction spanning two keys; each `save` stands alone.
pub trait KeyValueStore {
    /// Get the value for a key. Returns None if the key has never been saved.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the value stored under a key.
    fn save(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key directly, bypassing any encoding
    pub fn insert_raw(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.entries.borrow_mut().insert(key.to_string(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryKvStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Storage {
            key: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    /// File backing the given key
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StoreError::Storage {
                key: key.to_string(),
                message: "key must be non-empty ASCII letters, digits, '_', '-' or '.'"
                    .to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKvStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => {
                debug!("loaded {} bytes from {}", bytes.len(), path.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Storage {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        let storage_err = |e: std::io::Error| StoreError::Storage {
            key: key.to_string(),
            message: e.to_string(),
        };
        fs::write(&tmp_path, value).map_err(storage_err)?;
        fs::rename(&tmp_path, &path).map_err(storage_err)?;
        debug!("saved {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_absent_key() {
        let store = MemoryKvStore::new();
        assert!(store.load("missing").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_clones_share_data() {
        let store = MemoryKvStore::new();
        let handle = store.clone();
        store.save("k", b"[1,2]").unwrap();
        assert_eq!(handle.load("k").unwrap().as_deref(), Some(&b"[1,2]"[..]));
        assert!(handle.contains_key("k"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileKvStore::open(dir.path().join("data")).unwrap();
        assert!(store.load("qc_inspections").unwrap().is_none());

        store.save("qc_inspections", b"[]").unwrap();
        assert_eq!(
            store.load("qc_inspections").unwrap().as_deref(),
            Some(&b"[]"[..])
        );
        assert!(dir.path().join("data").join("qc_inspections.json").exists());
        assert!(!dir.path().join("data").join("qc_inspections.json.tmp").exists());
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        store.save("k", b"first").unwrap();
        store.save("k", b"second").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some(&b"second"[..]));
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        assert!(store.save("../escape", b"x").is_err());
        assert!(store.load("").is_err());
        assert!(store.load("a/b").is_err());
    }
}
