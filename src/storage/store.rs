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


//! Application store: the three persisted keys behind one backend

use crate::error::Result;
use crate::storage::backend::{FileBackend, MemoryBackend, StorageBackend};
use crate::storage::models::{Bookmark, Bookmarks, LastRead, Settings};
use crate::storage::persisted::{Persisted, StoreEvent};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;

pub const SETTINGS_KEY: &str = "settings";
pub const BOOKMARKS_KEY: &str = "bookmarks";
pub const LAST_READ_KEY: &str = "lastRead";

/// Capacity of the change-notification channel
const EVENT_CAPACITY: usize = 64;

/// Settings, bookmarks and reading position, persisted client-side
///
/// Cloning is cheap and clones share the backend and event channel.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    settings: Persisted<Settings>,
    bookmarks: Persisted<Bookmarks>,
    last_read: Persisted<Option<LastRead>>,
    events: broadcast::Sender<StoreEvent>,
}

impl Store {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let inner = StoreInner {
            settings: Persisted::new(backend.clone(), SETTINGS_KEY, Settings::default(), events.clone()),
            bookmarks: Persisted::new(backend.clone(), BOOKMARKS_KEY, Bookmarks::new(), events.clone()),
            last_read: Persisted::new(backend, LAST_READ_KEY, None, events.clone()),
            events,
        };
        Self { inner: Arc::new(inner) }
    }

    /// Store backed by JSON files in `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let backend = FileBackend::new(dir.as_ref())?;
        Ok(Self::new(Arc::new(backend)))
    }

    /// Store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Change notifications for every key
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    // ===== Settings =====

    pub fn settings(&self) -> Settings {
        self.inner.settings.get()
    }

    pub fn set_settings(&self, settings: &Settings) -> Result<()> {
        self.inner.settings.set(settings)
    }

    pub fn update_settings<R>(&self, f: impl FnOnce(&mut Settings) -> R) -> Result<R> {
        self.inner.settings.update(f)
    }

    // ===== Bookmarks =====

    pub fn bookmarks(&self) -> Bookmarks {
        self.inner.bookmarks.get()
    }

    pub fn is_bookmarked(&self, surah: u32, ayah: u32) -> bool {
        self.bookmarks().contains(surah, ayah)
    }

    /// Add or remove by (chapter, verse); returns whether it is now bookmarked
    pub fn toggle_bookmark(&self, bookmark: Bookmark) -> Result<bool> {
        self.inner.bookmarks.update(|list| list.toggle(bookmark))
    }

    /// Returns `true` if a bookmark was removed
    pub fn remove_bookmark(&self, surah: u32, ayah: u32) -> Result<bool> {
        self.inner.bookmarks.update(|list| list.remove(surah, ayah))
    }

    pub fn clear_bookmarks(&self) -> Result<()> {
        self.inner.bookmarks.set(&Bookmarks::new())
    }

    // ===== Reading position =====

    pub fn last_read(&self) -> Option<LastRead> {
        self.inner.last_read.get()
    }

    pub fn set_last_read(&self, last_read: LastRead) -> Result<()> {
        self.inner.last_read.set(&Some(last_read))
    }

    pub fn clear_last_read(&self) -> Result<()> {
        self.inner.last_read.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::{FontSize, Theme};

    fn bookmark(surah: u32, ayah: u32) -> Bookmark {
        Bookmark {
            surah_number: surah,
            surah_name: "Al-Baqara".to_string(),
            ayah_number: ayah,
            text: "ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ".to_string(),
            translation: "God - there is no deity save Him".to_string(),
        }
    }

    #[test]
    fn test_defaults_on_first_load() {
        let store = Store::in_memory();
        assert_eq!(store.settings(), Settings::default());
        assert!(store.bookmarks().is_empty());
        assert_eq!(store.last_read(), None);
    }

    #[test]
    fn test_settings_update() {
        let store = Store::in_memory();
        store
            .update_settings(|s| {
                s.font_size = FontSize::Large;
                s.theme = Theme::Light;
            })
            .unwrap();
        let settings = store.settings();
        assert_eq!(settings.font_size, FontSize::Large);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.translation, "en.asad");
    }

    #[test]
    fn test_bookmark_toggle_and_remove() {
        let store = Store::in_memory();
        assert!(store.toggle_bookmark(bookmark(2, 255)).unwrap());
        assert!(store.is_bookmarked(2, 255));
        assert!(!store.toggle_bookmark(bookmark(2, 255)).unwrap());
        assert!(!store.is_bookmarked(2, 255));

        store.toggle_bookmark(bookmark(2, 1)).unwrap();
        assert!(store.remove_bookmark(2, 1).unwrap());
        assert!(!store.remove_bookmark(2, 1).unwrap());
    }

    #[test]
    fn test_events_carry_key() {
        let store = Store::in_memory();
        let mut rx = store.subscribe();

        store.toggle_bookmark(bookmark(1, 1)).unwrap();
        store.set_last_read(LastRead::now(1, 1, "Al-Faatiha")).unwrap();
        store.clear_bookmarks().unwrap();

        assert_eq!(rx.try_recv().unwrap().key, BOOKMARKS_KEY);
        assert_eq!(rx.try_recv().unwrap().key, LAST_READ_KEY);
        assert_eq!(rx.try_recv().unwrap().key, BOOKMARKS_KEY);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::in_memory();
        let other = store.clone();
        other.set_last_read(LastRead::now(36, 1, "Yaseen")).unwrap();
        assert_eq!(store.last_read().unwrap().surah_name, "Yaseen");
        store.clear_last_read().unwrap();
        assert_eq!(other.last_read(), None);
    }
}
