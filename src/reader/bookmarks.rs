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


use crate::error::Result;
use crate::reader::router::Route;
use crate::storage::models::{Bookmark, Bookmarks};
use crate::storage::store::Store;
use tracing::info;

/// Saved verses, in the order they were added
#[derive(Debug, Clone)]
pub struct BookmarksView {
    store: Store,
}

impl BookmarksView {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn entries(&self) -> Bookmarks {
        self.store.bookmarks()
    }

    pub fn remove(&self, surah: u32, ayah: u32) -> Result<bool> {
        self.store.remove_bookmark(surah, ayah)
    }

    pub fn clear_all(&self) -> Result<()> {
        let count = self.store.bookmarks().len();
        self.store.clear_bookmarks()?;
        info!(count, "cleared bookmarks");
        Ok(())
    }

    /// Where "read" on a bookmark leads
    pub fn read_route(bookmark: &Bookmark) -> Route {
        Route::chapter(bookmark.surah_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(surah: u32, ayah: u32) -> Bookmark {
        Bookmark {
            surah_number: surah,
            surah_name: format!("Chapter {}", surah),
            ayah_number: ayah,
            text: "text".to_string(),
            translation: "translation".to_string(),
        }
    }

    #[test]
    fn test_insertion_order_and_remove() {
        let store = Store::in_memory();
        store.toggle_bookmark(bookmark(36, 1)).unwrap();
        store.toggle_bookmark(bookmark(2, 255)).unwrap();
        store.toggle_bookmark(bookmark(1, 1)).unwrap();

        let view = BookmarksView::new(store);
        let keys: Vec<_> = view.entries().iter().map(Bookmark::key).collect();
        assert_eq!(keys, vec![(36, 1), (2, 255), (1, 1)]);

        assert!(view.remove(2, 255).unwrap());
        let keys: Vec<_> = view.entries().iter().map(Bookmark::key).collect();
        assert_eq!(keys, vec![(36, 1), (1, 1)]);
    }

    #[test]
    fn test_clear_all() {
        let store = Store::in_memory();
        store.toggle_bookmark(bookmark(3, 7)).unwrap();
        let view = BookmarksView::new(store.clone());
        view.clear_all().unwrap();
        assert!(view.entries().is_empty());
        assert!(!store.is_bookmarked(3, 7));
    }

    #[test]
    fn test_read_route() {
        assert_eq!(BookmarksView::read_route(&bookmark(67, 3)), Route::ChapterDetail(67));
    }
}
