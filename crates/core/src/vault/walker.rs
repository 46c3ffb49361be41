//! Recursive vault directory walker.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum VaultWalkerError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("scope is outside the vault: {0}")]
    ScopeOutsideVault(String),

    #[error("failed to walk vault directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

/// A markdown file found in the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    pub absolute_path: PathBuf,
    /// Path relative to the vault root.
    pub relative_path: PathBuf,
}

/// Walker for discovering markdown documents in a vault.
#[derive(Debug)]
pub struct VaultWalker {
    root: PathBuf,
    /// Folders to skip, relative to the vault root.
    excluded_folders: Vec<PathBuf>,
}

impl VaultWalker {
    pub fn new(root: &Path) -> Result<Self, VaultWalkerError> {
        Self::with_exclusions(root, Vec::new())
    }

    /// Create a walker that skips the given folders. Absolute exclusions
    /// inside the vault are made relative to its root.
    pub fn with_exclusions(
        root: &Path,
        excluded_folders: Vec<PathBuf>,
    ) -> Result<Self, VaultWalkerError> {
        let root = root
            .canonicalize()
            .map_err(|_| VaultWalkerError::MissingRoot(root.display().to_string()))?;

        let excluded_folders = excluded_folders
            .into_iter()
            .map(|p| {
                if p.is_absolute() { p.strip_prefix(&root).unwrap_or(&p).to_path_buf() } else { p }
            })
            .collect();

        Ok(Self { root, excluded_folders })
    }

    /// All markdown files in the vault, sorted by relative path.
    pub fn walk(&self) -> Result<Vec<WalkedFile>, VaultWalkerError> {
        self.walk_scope(Path::new(""))
    }

    /// Markdown files below `scope`, sorted by relative path.
    ///
    /// `scope` is a folder or a single file, relative to the vault root or
    /// absolute inside it. An empty scope is the whole vault.
    pub fn walk_scope(&self, scope: &Path) -> Result<Vec<WalkedFile>, VaultWalkerError> {
        let start = self.resolve_scope(scope)?;
        let mut files = Vec::new();

        for entry in WalkDir::new(&start)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e.path(), e.depth()))
        {
            let entry = entry
                .map_err(|e| VaultWalkerError::WalkError(start.display().to_string(), e))?;

            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            files.push(WalkedFile {
                absolute_path: path.to_path_buf(),
                relative_path: path.strip_prefix(&self.root).unwrap_or(path).to_path_buf(),
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    fn resolve_scope(&self, scope: &Path) -> Result<PathBuf, VaultWalkerError> {
        let joined = if scope.is_absolute() { scope.to_path_buf() } else { self.root.join(scope) };
        let resolved = joined
            .canonicalize()
            .map_err(|_| VaultWalkerError::MissingRoot(joined.display().to_string()))?;

        if !resolved.starts_with(&self.root) {
            return Err(VaultWalkerError::ScopeOutsideVault(scope.display().to_string()));
        }
        Ok(resolved)
    }

    fn is_excluded(&self, path: &Path, depth: usize) -> bool {
        // The walk start is never filtered.
        if depth == 0 {
            return false;
        }

        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if name.starts_with('.') {
            return true;
        }
        if matches!(name.as_ref(), "node_modules" | "target" | "__pycache__" | "venv") {
            return true;
        }

        path.strip_prefix(&self.root)
            .is_ok_and(|relative| self.excluded_folders.iter().any(|ex| relative.starts_with(ex)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("md"))
}
