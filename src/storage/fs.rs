//! Filesystem-backed store

use crate::storage::traits::{Store, StorageError, StorageResult};
use std::fs;
use std::path::Path;

/// Writes crawl output as plain files under the output root
///
/// Re-crawling a URL overwrites the file written for it earlier.
#[derive(Debug, Default)]
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

impl Store for FsStore {
    fn write(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.display().to_string(),
                source,
            })?;
        }

        fs::write(path, bytes).map_err(|source| StorageError::WriteFile {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("example.com").join("abc").join("index.txt");

        let store = FsStore::new();
        store.write(&path, b"hello").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.bin");

        let store = FsStore::new();
        store.write(&path, b"first").unwrap();
        store.write(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_write_into_existing_directory() {
        let dir = TempDir::new().unwrap();
        let subdir = dir.path().join("host");
        std::fs::create_dir_all(&subdir).unwrap();

        let store = FsStore::new();
        store.write(&subdir.join("a.pdf"), b"%PDF").unwrap();

        assert!(subdir.join("a.pdf").exists());
    }

    #[test]
    fn test_write_empty_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");

        let store = FsStore::new();
        store.write(&path, b"").unwrap();

        assert_eq!(std::fs::read(&path).unwrap().len(), 0);
    }
}
