//! Durable storage backends for the persisted store.

use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Application name used for the default storage directory.
const APP_DIR: &str = "hue-bridge-rs";

/// The single fixed key the persisted snapshot lives under.
const STORE_FILE: &str = "state.json";

/// A single-key durable blob store.
///
/// The persisted store serializes its whole snapshot into one blob, read
/// once at startup and overwritten on every mutation.
pub trait StateStorage {
    /// Load the stored blob, or `None` if nothing has been stored yet.
    fn load(&mut self) -> Result<Option<String>>;

    /// Overwrite the stored blob.
    fn save(&mut self, blob: &str) -> Result<()>;
}

/// File-backed storage under the OS data directory.
///
/// - **Linux**: `~/.local/share/hue-bridge-rs/state.json`
/// - **macOS**: `~/Library/Application Support/hue-bridge-rs/state.json`
/// - **Windows**: `%APPDATA%\hue-bridge-rs\state.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create file storage at the OS-specific default location.
    pub fn new() -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            Error::storage(
                "locate",
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "could not determine the OS data directory",
                ),
            )
        })?;
        Ok(Self::with_path(data_dir.join(APP_DIR).join(STORE_FILE)))
    }

    /// Create file storage at a custom path.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        FileStorage {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file the snapshot is stored in.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStorage for FileStorage {
    fn load(&mut self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::storage("read", err)),
        }
    }

    fn save(&mut self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| Error::storage("create_dir", err))?;
        }
        std::fs::write(&self.path, blob).map_err(|err| Error::storage("write", err))?;
        debug!("persisted state to {}", self.path.display());
        Ok(())
    }
}

/// In-memory storage for tests and hosts with their own persistence layer.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    blob: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously saved blob, as a reloaded file would.
    pub fn with_blob(blob: &str) -> Self {
        MemoryStorage {
            blob: Some(blob.to_string()),
        }
    }

    /// The currently stored blob, if any.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl StateStorage for MemoryStorage {
    fn load(&mut self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::with_path(dir.path().join("state.json"));

        assert_eq!(storage.load().unwrap(), None);
        storage.save(r#"{"users":{}}"#).unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some(r#"{"users":{}}"#));
    }

    #[test]
    fn test_file_storage_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.json");
        let mut storage = FileStorage::with_path(&path);

        storage.save("{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load().unwrap(), None);
        storage.save("blob").unwrap();
        assert_eq!(storage.blob(), Some("blob"));
    }
}
