//! Content hashing for conflict detection.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::Result;
use std::path::Path;

/// Hash the current content of a file.
pub fn content_hash(path: &Path) -> Result<String> {
    let content = std::fs::read(path)?;
    Ok(hash_bytes(&content))
}

/// Hash document text. Line endings and a trailing newline count, so any
/// byte-level edit changes the hash.
pub fn content_hash_str(content: &str) -> String {
    hash_bytes(content.as_bytes())
}

fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn hash_is_stable() {
        let content = "---\ntags: [a]\n---\nbody\n";
        assert_eq!(content_hash_str(content), content_hash_str(content));
    }

    #[test]
    fn hash_sees_line_ending_changes() {
        assert_ne!(content_hash_str("a\nb\n"), content_hash_str("a\r\nb\r\n"));
        assert_ne!(content_hash_str("a\n"), content_hash_str("a"));
    }

    #[test]
    fn file_hash_matches_str_hash() {
        let content = "# Test\n\nContent here.\n";
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.md");
        fs::write(&path, content).unwrap();

        let hash = content_hash(&path).unwrap();
        assert_eq!(hash.len(), 16);
        assert_eq!(hash, content_hash_str(content));
    }
}
