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


//! Client-side persistence
//!
//! Settings, bookmarks and the last reading position are stored as JSON text
//! under fixed keys (`settings`, `bookmarks`, `lastRead`).
//!
//! # Layers
//! - `backend` - where text lives ([`FileBackend`] on disk, [`MemoryBackend`] for tests)
//! - `persisted` - typed binding per key with default fallback and write-through
//! - `store` - the three bindings plus change notifications
//!
//! # Usage Example
//! ```no_run
//! use almumin_core::storage::{Store, models::Theme};
//!
//! # fn example() -> almumin_core::error::Result<()> {
//! let store = Store::open("/tmp/almumin")?;
//! store.update_settings(|s| s.theme = Theme::Light)?;
//! assert_eq!(store.settings().theme, Theme::Light);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod models;
pub mod persisted;
pub mod store;

// Re-export commonly used types
pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use models::{Bookmark, Bookmarks, FontSize, LastRead, Settings, Theme};
pub use persisted::{Persisted, StoreEvent};
pub use store::{Store, BOOKMARKS_KEY, LAST_READ_KEY, SETTINGS_KEY};
