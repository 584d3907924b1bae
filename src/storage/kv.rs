//! Key-value persistence for prepdesk data.
//!
//! The application treats persistence as a string-keyed store of JSON
//! documents, one document per collection ("revisionItems", "quizAttempts",
//! ...). `FileStore` keeps each document as a pretty-printed file under the
//! data directory; `MemoryStore` backs tests and one-off tooling.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
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

/// A string-keyed store of JSON documents.
///
/// Reads are tolerant: a missing or unreadable document is reported as
/// `None` and higher layers fall back to an empty collection. Writes are
/// all-or-nothing and surface their errors.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Store keeping one `<key>.json` file per key under a base directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Default data directory: `$PREPDESK_HOME` if set, otherwise the
    /// platform-local data dir (e.g. `~/.local/share/prepdesk`).
    pub fn default_data_dir() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os("PREPDESK_HOME") {
            return Ok(PathBuf::from(home));
        }
        dirs::data_local_dir()
            .map(|p| p.join("prepdesk"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) => {
                log::warn!("Failed to read {:?}: {}", path, err);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store. Holds documents in a map; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// Decode the JSON document at `key`, falling back to the default on a
/// missing or malformed document. Corruption is logged and discarded rather
/// than propagated: a damaged file must not take the whole collection down.
pub fn load_json_or_default<T>(store: &impl KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        None => T::default(),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Discarding malformed document '{}': {}", key, err);
                T::default()
            }
        },
    }
}

/// Encode `value` pretty-printed and store it under `key`.
pub fn store_json<T: Serialize>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    store.set(key, &json)
}
