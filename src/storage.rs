//! Durable key/value storage for carts.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing a stored value
    #[error("Failed to access storage: {0}")]
    Io(#[from] io::Error),

    /// Key cannot be mapped onto the backend
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Stored value under this key is not valid UTF-8
    #[error("Stored value for {0:?} is not valid UTF-8")]
    NotUtf8(String),
}

/// Check that `key` is non-empty and made only of ASCII alphanumerics, `-` or `_`.
///
/// Every backend accepts such keys.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

/// A string-keyed store of string values, in the manner of browser local storage.
pub trait Storage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage, lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage holding a single entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = FxHashMap::default();
        entries.insert(key.into(), value.into());

        Self { entries }
    }

    /// Peek at a stored value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);

        Ok(())
    }
}

/// Storage backed by a directory, one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Store files under `base_path`, created on first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory holding the stored files.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] unless [`is_valid_key`] accepts the key.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.base_path.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read(self.path_for(key)?) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_err| StorageError::NotUtf8(key.to_string())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.base_path)?;

        // Write then rename so a failed write never leaves a truncated cart behind.
        let tmp_path = path.with_extension("json.tmp");
        let written = fs::write(&tmp_path, value).and_then(|()| fs::rename(&tmp_path, &path));

        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                debug!(path = %tmp_path.display(), error = %cleanup, "failed to remove temporary cart file");
            }

            return Err(err.into());
        }

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
