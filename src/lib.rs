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


//! Quran reader core
//!
//! Chapter text, translations and recitations from the alquran.cloud API,
//! with bookmarks, reading position and preferences persisted locally.
//!
//! - [`api`] - remote content client
//! - [`storage`] - persisted settings, bookmarks, reading position
//! - [`audio`] - sequential verse playback
//! - [`reader`] - view models and routes
//! - [`config`] - application configuration

pub mod api;
pub mod audio;
pub mod config;
pub mod error;
pub mod reader;
pub mod storage;

pub use error::{ReaderError, Result};
