//! Durable key-value stores backing the cart.
//!
//! A store holds named slots of text. The cart manager is the sole writer of
//! its slot and rewrites it in full after every mutation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

/// Errors raised by a [`CartStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Slot names are restricted to ASCII letters, digits, `-` and `_`.
    #[error("invalid slot name: {0:?}")]
    InvalidKey(String),
}

/// Origin-scoped persistence for serialized cart state.
pub trait CartStore {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store shared by every handle cloned from it.
///
/// Clones see each other's writes, which is how a fresh manager observes
/// what a dropped one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw contents of a slot.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl CartStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One directory per origin, one `<slot>.json` file per slot.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl CartStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        // Write-then-rename so readers never see a partial slot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_slots() {
        let mut store = MemoryStore::new();
        let other = store.clone();
        assert_eq!(other.read("cart").unwrap(), None);

        store.write("cart", "[]").unwrap();
        assert_eq!(other.read("cart").unwrap().as_deref(), Some("[]"));

        store.write("cart", "[1]").unwrap();
        assert_eq!(other.get("cart").as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_missing_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.read("cart").unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("origin")).unwrap();
        store.write("cart", "first").unwrap();
        store.write("cart", "second").unwrap();

        let reopened = FileStore::open(dir.path().join("origin")).unwrap();
        assert_eq!(reopened.read("cart").unwrap().as_deref(), Some("second"));
        assert!(!dir.path().join("origin/cart.json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.write("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.read(""), Err(StoreError::InvalidKey(_))));
    }
}
