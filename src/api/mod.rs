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


//! Remote content client
//!
//! Read-only access to chapter text, translations, verse recitations and
//! search on the alquran.cloud REST API.

pub mod client;
pub mod models;
pub mod quran;

// Re-export commonly used types
pub use client::{ClientConfig, QuranClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use models::{
    Chapter, ChapterText, Edition, EditionVerse, RevelationType, SearchMatch, SearchResults,
    Verse, VerseAudio, CHAPTER_COUNT,
};
pub use quran::{DEFAULT_RECITER, DEFAULT_TRANSLATION};
