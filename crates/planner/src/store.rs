//! Local key-value store.
//!
//! Each key is one JSON file in the data directory. Writes go to a sibling
//! temporary file first and are renamed into place, so a reader never sees a
//! half-written value. Concurrent writers are last-write-wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key of the saved wizard step, kept apart from the form snapshot.
pub const WIZARD_STEP_KEY: &str = "budget_calculator_step";

/// Key of the locally kept lead records.
pub const LEADS_KEY: &str = "user_leads";

/// Errors from the local store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Keys become file names, so only a safe alphabet is allowed.
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
}

/// A directory of JSON values addressed by key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read and decode a value; `None` when the key was never written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be read or is not valid JSON
    /// for `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        let path = self.path_for(key)?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    /// Read the stored text without decoding it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the key is invalid or the file cannot be read.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Encode and write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or writing fails.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;

        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(key, path = %path.display(), "Stored value");
        Ok(())
    }

    /// Delete a key. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be removed.
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get::<Vec<u32>>("nothing").unwrap(), None);
        assert!(!store.remove("nothing").unwrap());
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.set("numbers", &vec![1, 2, 3]).unwrap();
        assert_eq!(store.get::<Vec<u32>>("numbers").unwrap(), Some(vec![1, 2, 3]));

        store.set("numbers", &vec![4]).unwrap();
        assert_eq!(store.get::<Vec<u32>>("numbers").unwrap(), Some(vec![4]));
        assert!(!dir.path().join("nested/numbers.json.tmp").exists());

        assert!(store.remove("numbers").unwrap());
        assert_eq!(store.get::<Vec<u32>>("numbers").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let store = FileStore::new("unused");
        assert!(matches!(
            store.get::<u32>("../secrets"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.set("", &1), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_wrong_shape_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("value", "text").unwrap();
        assert!(matches!(
            store.get::<Vec<u32>>("value"),
            Err(StoreError::Json { .. })
        ));
        assert_eq!(store.get_raw("value").unwrap().as_deref(), Some("\"text\""));
    }
}
