// kv.rs — KeyValueStore: the shared container the host app and widget both see.
//
// The host application owns the container and writes the goal list into it;
// the widget reads it and writes it back after a toggle. There is no locking:
// two writers racing on the same key resolve as last-write-wins.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use crate::error::GoalError;

/// A byte-valued key-value container.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, GoalError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), GoalError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, GoalError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), GoalError> {
        (**self).set(key, value)
    }
}

/// In-memory container for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `value` already present under `key`.
    pub fn with_value(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.entries().insert(key.to_string(), value.into());
        store
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panic while holding the lock can't leave a half-written Vec behind.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, GoalError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), GoalError> {
        self.entries().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// A shared container backed by a directory.
///
/// Each key is stored as `<container_dir>/<key>.json`. Every write lands in
/// its own temporary sibling and is renamed into place, so readers see either
/// the old value or the new one, and concurrent writers never share a file.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    container_dir: PathBuf,
}

impl DirectoryStore {
    /// Open the container at `container_dir`, creating it if needed.
    pub fn open(container_dir: impl AsRef<Path>) -> Result<Self, GoalError> {
        let container_dir = container_dir.as_ref().to_path_buf();
        fs::create_dir_all(&container_dir).map_err(|source| GoalError::IoError {
            path: container_dir.display().to_string(),
            source,
        })?;
        Ok(Self { container_dir })
    }

    pub fn container_dir(&self) -> &Path {
        &self.container_dir
    }

    /// Path of the file backing `key`.
    fn value_file(&self, key: &str) -> Result<PathBuf, GoalError> {
        let valid = !key.is_empty()
            && key != "."
            && !key.contains("..")
            && !key.contains(['/', '\\', '\0']);
        if !valid {
            return Err(GoalError::InvalidKey(key.to_string()));
        }
        Ok(self.container_dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, GoalError> {
        let path = self.value_file(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GoalError::Storage {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), GoalError> {
        let path = self.value_file(key)?;
        let storage_error = |source: std::io::Error| GoalError::Storage {
            key: key.to_string(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.container_dir).map_err(storage_error)?;
        tmp.write_all(value).map_err(storage_error)?;
        tmp.persist(&path).map_err(|e| storage_error(e.error))?;
        Ok(())
    }
}
