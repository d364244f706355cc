use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::error::AppResult;

use super::KeyValueStore;

/// Key-value store backed by a single JSON object file
///
/// Every `set` is a read-modify-write of the whole file. A corrupted file is
/// treated as empty with a warning rather than an error, so one bad write
/// never wedges the store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store at `<data_dir>/store.json`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join("store.json"),
        }
    }

    fn read_entries(&self) -> HashMap<String, Value> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read store file, treating as empty");
                return HashMap::new();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Corrupt store file, treating as empty");
                HashMap::new()
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.read_entries().remove(key))
    }

    fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&entries)?)?;

        tracing::debug!(key = %key, path = %self.path.display(), "Persisted store entry");

        Ok(())
    }
}
