//! File-backed key-value persistence
//!
//! The review store treats persistence as an opaque capability: a string
//! blob per fixed key, whole-blob reads and overwrites, no versioning.
//! [`FileKvStore`] maps each key to one `<key>.json` file under a base
//! directory.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Key-value blob storage contract
pub trait KvStore {
    /// Read the blob stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the blob stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One file per key under a base directory
pub struct FileKvStore {
    base_path: PathBuf,
}

impl FileKvStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("mneme"))
            .ok_or(StorageError::DataDirNotFound)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKvStore::new(dir.path().to_path_buf());

        assert!(kv.get("nothing-here").unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKvStore::new(dir.path().join("nested"));

        kv.set("blob", "[1,2,3]").unwrap();
        assert_eq!(kv.get("blob").unwrap().as_deref(), Some("[1,2,3]"));

        kv.set("blob", "[]").unwrap();
        assert_eq!(kv.get("blob").unwrap().as_deref(), Some("[]"));
    }
}
