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


//! Presentation-agnostic view models
//!
//! Each view turns store and API data into plain snapshots a front end can
//! render, and maps user actions back onto the store or the player.
//!
//! # Module Organization
//! - `router` - path ↔ [`Route`] mapping
//! - `catalog` - chapter filter, pagination, page-number strip
//! - `dashboard` - "continue reading" card
//! - `chapter` - chapter detail: concurrent load, verse cards, bookmarks, playback
//! - `bookmarks` - saved verses
//! - `settings` - preference form with translation and reciter catalogs

pub mod bookmarks;
pub mod catalog;
pub mod chapter;
pub mod dashboard;
pub mod router;
pub mod settings;

// Re-export commonly used types
pub use bookmarks::BookmarksView;
pub use catalog::{
    filter_chapters, page_links, paginate, ChapterListSnapshot, ChapterListView, Page, PageLink,
    DEFAULT_PAGE_SIZE,
};
pub use chapter::{ChapterDetail, ChapterPage, ChapterSource, ChapterView, LoadState, VerseCard};
pub use dashboard::{ContinueReading, Dashboard};
pub use router::Route;
pub use settings::{CatalogEntry, SettingsForm, RECITERS, TRANSLATIONS};
