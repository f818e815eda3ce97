//! Persisted client state as named JSON documents in the platform config dir.

use std::{fs, io, path::PathBuf};

use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no writable config directory for this platform")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A directory of JSON documents, one file per document name.
///
/// Reads are forgiving: a missing or unreadable document is `None`. Writes
/// surface errors.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open the default storage location for this application.
    pub fn open() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("", "", "taskhub").ok_or(StorageError::NoConfigDir)?;
        Ok(Self {
            dir: dirs.config_dir().to_path_buf(),
        })
    }

    /// Open storage rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.path(name);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(document = name, error = %e, "discarding unreadable state document");
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let contents = serde_json::to_string_pretty(value)?;
        fs::write(self.path(name), contents)?;
        Ok(())
    }

    pub fn remove(&self, name: &str) {
        let path = self.path(name);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(document = name, error = %e, "failed to remove state document");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        value: u32,
    }

    #[test]
    fn save_load_remove_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = Storage::at(tmp.path());

        assert_eq!(storage.load::<Doc>("doc.json"), None);
        storage.save("doc.json", &Doc { value: 7 }).unwrap();
        assert_eq!(storage.load::<Doc>("doc.json"), Some(Doc { value: 7 }));
        storage.remove("doc.json");
        assert_eq!(storage.load::<Doc>("doc.json"), None);
    }

    #[test]
    fn corrupt_document_reads_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = Storage::at(tmp.path());
        std::fs::write(tmp.path().join("doc.json"), "not json").unwrap();
        assert_eq!(storage.load::<Doc>("doc.json"), None);
    }
}
