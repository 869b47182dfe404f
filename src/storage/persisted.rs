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


//! Typed read/write binding for one storage key
//!
//! - Reads deserialize the stored JSON, falling back to the default when the
//!   key is absent or the text is malformed
//! - Writes serialize and go straight to the backend (write-through), then
//!   notify subscribers with a [`StoreEvent`]
//! - Values are replaced wholesale; there is no partial merge

use crate::error::{ReaderError, Result};
use crate::storage::backend::StorageBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tracing::warn;

/// Emitted after every successful write or removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub key: String,
}

pub struct Persisted<T> {
    backend: Arc<dyn StorageBackend>,
    key: String,
    default: T,
    events: broadcast::Sender<StoreEvent>,
    /// Serializes read-modify-write cycles on this key
    write_lock: Mutex<()>,
}

impl<T> std::fmt::Debug for Persisted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persisted").field("key", &self.key).finish()
    }
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        key: impl Into<String>,
        default: T,
        events: broadcast::Sender<StoreEvent>,
    ) -> Self {
        Self {
            backend,
            key: key.into(),
            default,
            events,
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Current value; absent or malformed data yields the default
    ///
    /// # Errors
    /// Only backend I/O failures are returned.
    pub fn load(&self) -> Result<T> {
        let Some(text) = self.backend.read(&self.key)? else {
            return Ok(self.default.clone());
        };

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key = %self.key, error = %e, "malformed stored value, using default");
                Ok(self.default.clone())
            }
        }
    }

    /// Current value, degrading backend failures to the default as well
    pub fn get(&self) -> T {
        self.load().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "storage read failed, using default");
            self.default.clone()
        })
    }

    /// Replace the stored value
    pub fn set(&self, value: &T) -> Result<()> {
        let _guard = self.lock()?;
        self.write(value)
    }

    /// Read-modify-write; `f`'s return value is passed through
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let _guard = self.lock()?;
        let mut value = self.load()?;
        let result = f(&mut value);
        self.write(&value)?;
        Ok(result)
    }

    /// Remove the stored value; subsequent reads yield the default
    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock()?;
        self.backend.remove(&self.key)?;
        self.notify();
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| ReaderError::storage(format!("write lock for '{}' poisoned", self.key)))
    }

    fn write(&self, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.backend.write(&self.key, &text)?;
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        // No receivers is fine
        let _ = self.events.send(StoreEvent { key: self.key.clone() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::MemoryBackend;

    fn binding(backend: Arc<dyn StorageBackend>) -> (Persisted<Vec<u32>>, broadcast::Receiver<StoreEvent>) {
        let (tx, rx) = broadcast::channel(16);
        (Persisted::new(backend, "numbers", vec![7], tx), rx)
    }

    #[test]
    fn test_absent_key_yields_default() {
        let (numbers, _rx) = binding(Arc::new(MemoryBackend::new()));
        assert_eq!(numbers.get(), vec![7]);
    }

    #[test]
    fn test_malformed_value_yields_default() {
        let backend = Arc::new(MemoryBackend::new());
        backend.write("numbers", "{not json").unwrap();
        let (numbers, _rx) = binding(backend.clone());
        assert_eq!(numbers.load().unwrap(), vec![7]);

        backend.write("numbers", r#""a string""#).unwrap();
        assert_eq!(numbers.get(), vec![7]);
    }

    #[test]
    fn test_set_writes_through_and_notifies() {
        let backend = Arc::new(MemoryBackend::new());
        let (numbers, mut rx) = binding(backend.clone());

        numbers.set(&vec![1, 2, 3]).unwrap();
        assert_eq!(backend.read("numbers").unwrap().as_deref(), Some("[1,2,3]"));
        assert_eq!(numbers.get(), vec![1, 2, 3]);
        assert_eq!(rx.try_recv().unwrap().key, "numbers");
    }

    #[test]
    fn test_update_returns_closure_result() {
        let (numbers, _rx) = binding(Arc::new(MemoryBackend::new()));
        let len = numbers
            .update(|v| {
                v.push(8);
                v.len()
            })
            .unwrap();
        assert_eq!(len, 2);
        assert_eq!(numbers.get(), vec![7, 8]);
    }

    #[test]
    fn test_clear_restores_default() {
        let (numbers, mut rx) = binding(Arc::new(MemoryBackend::new()));
        numbers.set(&vec![]).unwrap();
        assert_eq!(numbers.get(), Vec::<u32>::new());
        numbers.clear().unwrap();
        assert_eq!(numbers.get(), vec![7]);
        assert_eq!(rx.try_recv().unwrap().key, "numbers");
        assert_eq!(rx.try_recv().unwrap().key, "numbers");
    }
}
