//! Filesystem-backed document store over a vault directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{DocumentStore, StoreError};
use crate::vault::{VaultWalker, content_hash, content_hash_str};

/// Documents stored as markdown files below a vault root.
#[derive(Debug)]
pub struct FileStore {
    walker: VaultWalker,
}

impl FileStore {
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        Self::with_exclusions(root, Vec::new())
    }

    pub fn with_exclusions(root: &Path, excluded: Vec<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self { walker: VaultWalker::with_exclusions(root, excluded)? })
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.root().join(path) }
    }
}

impl DocumentStore for FileStore {
    fn check_available(&self) -> Result<(), StoreError> {
        let root = self.root();
        if root.is_dir() {
            Ok(())
        } else {
            let reason = format!("vault root {} is not a directory", root.display());
            Err(StoreError::Unavailable(reason))
        }
    }

    fn list(&self, scope: &Path) -> Result<Vec<PathBuf>, StoreError> {
        Ok(self.walker.walk_scope(scope)?.into_iter().map(|f| f.relative_path).collect())
    }

    fn read(&self, path: &Path) -> Result<String, StoreError> {
        let absolute = self.absolute(path);
        if !absolute.is_file() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        fs::read_to_string(&absolute)
            .map_err(|source| StoreError::Read { path: path.to_path_buf(), source })
    }

    fn write(&mut self, path: &Path, expected: &str, next: String) -> Result<(), StoreError> {
        let absolute = self.absolute(path);

        let on_disk = content_hash(&absolute)
            .map_err(|source| StoreError::Read { path: path.to_path_buf(), source })?;
        if on_disk != content_hash_str(expected) {
            return Err(StoreError::Conflict(path.to_path_buf()));
        }

        write_atomic(&absolute, &next)
            .map_err(|source| StoreError::Write { path: path.to_path_buf(), source })?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Write through a sibling temporary file renamed over the target.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.mdw-tmp"));

    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn lists_and_reads_relative_paths() {
        let dir = vault(&[("b.md", "B"), ("a/c.md", "C"), ("skip.txt", "x")]);
        let store = FileStore::open(dir.path()).unwrap();

        let paths = store.list(Path::new("")).unwrap();
        assert_eq!(paths, vec![PathBuf::from("a/c.md"), PathBuf::from("b.md")]);
        assert_eq!(store.read(Path::new("b.md")).unwrap(), "B");
    }

    #[test]
    fn read_missing_is_not_found() {
        let dir = vault(&[]);
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.read(Path::new("nope.md")), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn update_text_writes_and_leaves_no_temp_file() {
        let dir = vault(&[("a.md", "old\n")]);
        let mut store = FileStore::open(dir.path()).unwrap();

        let changed =
            store.update_text(Path::new("a.md"), &mut |text| text.replace("old", "new")).unwrap();

        assert!(changed);
        assert_eq!(fs::read_to_string(dir.path().join("a.md")).unwrap(), "new\n");
        let names: Vec<_> =
            fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn concurrent_change_is_a_conflict() {
        let dir = vault(&[("a.md", "original\n")]);
        let mut store = FileStore::open(dir.path()).unwrap();
        let path = dir.path().join("a.md");

        let result = store.update_text(Path::new("a.md"), &mut |text| {
            fs::write(&path, "edited elsewhere\n").unwrap();
            format!("{text}appended\n")
        });

        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited elsewhere\n");
    }

    #[test]
    fn line_ending_change_on_disk_is_a_conflict() {
        let dir = vault(&[("a.md", "one\ntwo\n")]);
        let mut store = FileStore::open(dir.path()).unwrap();
        let path = dir.path().join("a.md");
        fs::write(&path, "one\r\ntwo\r\n").unwrap();

        let result = store.write(Path::new("a.md"), "one\ntwo\n", "three\n".into());

        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\r\ntwo\r\n");
    }

    #[test]
    fn write_to_deleted_file_is_a_read_error() {
        let dir = vault(&[("a.md", "x\n")]);
        let mut store = FileStore::open(dir.path()).unwrap();
        fs::remove_file(dir.path().join("a.md")).unwrap();

        let result = store.write(Path::new("a.md"), "x\n", "y\n".into());
        assert!(matches!(result, Err(StoreError::Read { .. })));
    }

    #[test]
    fn update_metadata_reports_no_change() {
        let dir = vault(&[("a.md", "---\na: 1\n---\nbody\n")]);
        let mut store = FileStore::open(dir.path()).unwrap();

        let changed = store.update_metadata(Path::new("a.md"), &mut |_| {}).unwrap();
        assert!(!changed);
    }
}
