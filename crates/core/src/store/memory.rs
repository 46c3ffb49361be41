//! In-memory document store, used for dry runs and tests.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use super::{DocumentStore, StoreError};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    documents: BTreeMap<PathBuf, String>,
    /// Listed documents whose reads fail, with the reason.
    unreadable: BTreeMap<PathBuf, String>,
    read_only: BTreeSet<PathBuf>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every document under `scope` out of another store. Documents the
    /// source cannot read stay unreadable in the copy.
    pub fn snapshot(source: &dyn DocumentStore, scope: &Path) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for path in source.list(scope)? {
            match source.read(&path) {
                Ok(text) => store.insert(path, text),
                Err(StoreError::Read { source: reason, .. }) => {
                    store.set_unreadable(path, reason.to_string());
                }
                Err(e) => store.set_unreadable(path, e.to_string()),
            }
        }
        Ok(store)
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        let path = path.into();
        self.unreadable.remove(&path);
        self.documents.insert(path, text.into());
    }

    /// List `path` but make every read of it fail with `reason`.
    pub fn set_unreadable(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        let path = path.into();
        self.documents.remove(&path);
        self.unreadable.insert(path, reason.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.documents.get(path.as_ref()).map(String::as_str)
    }

    /// Make writes to `path` fail.
    pub fn set_read_only(&mut self, path: impl Into<PathBuf>) {
        self.read_only.insert(path.into());
    }

    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }
}

impl DocumentStore for MemoryStore {
    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }

    fn list(&self, scope: &Path) -> Result<Vec<PathBuf>, StoreError> {
        let paths: BTreeSet<&PathBuf> = self
            .documents
            .keys()
            .chain(self.unreadable.keys())
            .filter(|path| path.starts_with(scope))
            .collect();
        Ok(paths.into_iter().cloned().collect())
    }

    fn read(&self, path: &Path) -> Result<String, StoreError> {
        if let Some(reason) = self.unreadable.get(path) {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, reason.clone()),
            });
        }
        self.documents.get(path).cloned().ok_or_else(|| StoreError::NotFound(path.to_path_buf()))
    }

    fn write(&mut self, path: &Path, expected: &str, next: String) -> Result<(), StoreError> {
        if self.read_only.contains(path) {
            return Err(StoreError::Write {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "document is read-only"),
            });
        }

        let current = self
            .documents
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))?;
        if current.as_str() != expected {
            return Err(StoreError::Conflict(path.to_path_buf()));
        }
        *current = next;
        Ok(())
    }
}
