// AlMumin - Quran Reader Core
// Copyright (C) 2025 AlMumin contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Key-value storage backends
//!
//! Values are opaque text; (de)serialization happens one layer up in
//! [`Persisted`](crate::storage::Persisted). All calls are synchronous.

use crate::error::{ReaderError, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Text storage addressed by key
pub trait StorageBackend: Send + Sync {
    /// Stored text, or `None` if the key was never written (or was removed)
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the stored text for `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Forget `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-process storage; contents are lost when dropped
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ReaderError::storage("memory backend lock poisoned"))
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Use `root` as the storage directory, creating it if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            ReaderError::storage(format!("Could not create {}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ReaderError::invalid_input(format!("Invalid storage key: '{}'", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ReaderError::storage(format!("Failed to read {}: {}", path.display(), e))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)
            .and_then(|_| std::fs::rename(&tmp, &path))
            .map_err(|e| ReaderError::storage(format!("Failed to write {}: {}", path.display(), e)))?;
        debug!(key, path = %path.display(), "persisted");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ReaderError::storage(format!("Failed to remove {}: {}", path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.read("settings").unwrap(), None);
        backend.write("settings", "{}").unwrap();
        assert_eq!(backend.read("settings").unwrap().as_deref(), Some("{}"));
        backend.remove("settings").unwrap();
        backend.remove("settings").unwrap();
        assert_eq!(backend.read("settings").unwrap(), None);
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested")).unwrap();

        assert_eq!(backend.read("lastRead").unwrap(), None);
        backend.write("lastRead", r#"{"a":1}"#).unwrap();
        assert!(dir.path().join("nested/lastRead.json").exists());
        assert_eq!(backend.read("lastRead").unwrap().as_deref(), Some(r#"{"a":1}"#));

        backend.write("lastRead", "null").unwrap();
        assert_eq!(backend.read("lastRead").unwrap().as_deref(), Some("null"));
        assert!(!dir.path().join("nested/lastRead.json.tmp").exists());

        backend.remove("lastRead").unwrap();
        assert_eq!(backend.read("lastRead").unwrap(), None);
    }

    #[test]
    fn test_file_backend_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();
        assert!(matches!(backend.write("../escape", "x"), Err(ReaderError::InvalidInput(_))));
        assert!(matches!(backend.read(""), Err(ReaderError::InvalidInput(_))));
    }
}
