//! File-backed credential storage.

use super::CredentialStore;
use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// Stores the API key as a single trimmed line in a file.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Create a store backed by the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CredentialStore for FileKeyStore {
    fn load(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn save(&self, credential: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Credential(format!("cannot create {}: {e}", parent.display())))?;
        }
        fs::write(&self.path, credential)
            .map_err(|e| Error::Credential(format!("cannot write {}: {e}", self.path.display())))
    }

    fn delete(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Credential(format!(
                "cannot delete {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileKeyStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path().join("apikey.txt"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_returns_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, store) = temp_store();
        store.save("sk-test\n").unwrap();
        assert_eq!(store.load(), Some("sk-test".to_string()));
    }

    #[test]
    fn test_empty_file_reads_as_none() {
        let (_dir, store) = temp_store();
        store.save("   \n").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_delete_reports_existence() {
        let (_dir, store) = temp_store();
        assert!(!store.delete().unwrap());
        store.save("key").unwrap();
        assert!(store.delete().unwrap());
        assert_eq!(store.load(), None);
    }
}
