//! Document hosts.
//!
//! The [`DocumentStore`] trait is the boundary between the editing engine
//! and wherever documents live. Implementations provide raw reads and
//! conflict-checked writes; the metadata and text transactions are built on
//! top of those.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::Document;
use crate::frontmatter::{Frontmatter, FrontmatterParseError, parse_block, rewrite_document};
use crate::tags::known_tags;
use crate::vault::VaultWalkerError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document host unavailable: {0}")]
    Unavailable(String),

    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} changed on disk while it was being edited")]
    Conflict(PathBuf),

    #[error("invalid frontmatter in {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: FrontmatterParseError,
    },

    #[error(transparent)]
    Walk(#[from] VaultWalkerError),
}

/// A document as returned by a query.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub path: PathBuf,
    pub metadata: Frontmatter,
    /// Marker-prefixed union of structured and inline tags.
    pub tags: Vec<String>,
}

impl DocumentRecord {
    /// Build a record from raw text. An unreadable leading block yields empty
    /// metadata; the document fails later, when it is edited.
    pub fn from_text(path: PathBuf, text: &str) -> Self {
        let doc = Document::parse(text);
        let metadata = if doc.has_leading() {
            parse_block(doc.leading()).unwrap_or_else(|e| {
                tracing::warn!("Ignoring frontmatter of {}: {e}", path.display());
                Frontmatter::default()
            })
        } else {
            Frontmatter::default()
        };
        let tags = known_tags(&doc, Some(&metadata));
        Self { path, metadata, tags }
    }

    /// A listed document whose text could not be read. It carries no
    /// metadata or tags; editing it fails with the read error.
    pub fn unreadable(path: PathBuf) -> Self {
        Self { path, metadata: Frontmatter::default(), tags: Vec::new() }
    }

    /// Frontmatter keys in insertion order.
    pub fn property_keys(&self) -> Vec<String> {
        self.metadata.keys().map(ToString::to_string).collect()
    }
}

/// Storage for documents addressed by vault-relative paths.
pub trait DocumentStore {
    /// Fails when the host cannot serve documents at all.
    fn check_available(&self) -> Result<(), StoreError>;

    /// Paths of the documents under `scope`, in a stable order.
    fn list(&self, scope: &Path) -> Result<Vec<PathBuf>, StoreError>;

    fn read(&self, path: &Path) -> Result<String, StoreError>;

    /// Replace the content of `path` with `next`, provided it still holds
    /// `expected`. Returns [`StoreError::Conflict`] otherwise.
    fn write(&mut self, path: &Path, expected: &str, next: String) -> Result<(), StoreError>;

    /// Documents under `scope` with their metadata and tags.
    ///
    /// Only a failed listing is an error. A document that cannot be read is
    /// kept as a [`DocumentRecord::unreadable`] record.
    fn query(&self, scope: &Path) -> Result<Vec<DocumentRecord>, StoreError> {
        let records = self
            .list(scope)?
            .into_iter()
            .map(|path| match self.read(&path) {
                Ok(text) => DocumentRecord::from_text(path, &text),
                Err(e) => {
                    tracing::warn!("Cannot read {}: {e}", path.display());
                    DocumentRecord::unreadable(path)
                }
            })
            .collect();
        Ok(records)
    }

    /// Read-modify-write of the leading block. Returns whether the document
    /// changed.
    fn update_metadata(
        &mut self,
        path: &Path,
        mutate: &mut dyn FnMut(&mut Frontmatter),
    ) -> Result<bool, StoreError> {
        let current = self.read(path)?;
        let rewritten = rewrite_document(&current, |fm| mutate(fm))
            .map_err(|source| StoreError::Metadata { path: path.to_path_buf(), source })?;

        match rewritten {
            Some(next) => {
                self.write(path, &current, next)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Read-modify-write of the whole text. Returns whether the document
    /// changed.
    fn update_text(
        &mut self,
        path: &Path,
        mutate: &mut dyn FnMut(&str) -> String,
    ) -> Result<bool, StoreError> {
        let current = self.read(path)?;
        let next = mutate(&current);
        if next == current {
            return Ok(false);
        }
        self.write(path, &current, next)?;
        Ok(true)
    }
}
