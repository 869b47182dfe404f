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


//! Content endpoints
//!
//! # API Endpoints
//! - `GET /surah` - all chapters
//! - `GET /surah/{n}` - chapter in the default script edition
//! - `GET /surah/{n}/{edition}` - chapter in a translation edition
//! - `GET /ayah/{n}:{a}/{edition}` - one verse in an edition (text or audio)
//! - `GET /search/{query}/all/{edition}` - full-text search in an edition

use crate::api::client::QuranClient;
use crate::api::models::{
    Chapter, ChapterText, EditionVerse, SearchResults, VerseAudio, CHAPTER_COUNT,
};
use crate::error::{ReaderError, Result};

/// Translation used when none is configured
pub const DEFAULT_TRANSLATION: &str = "en.asad";

/// Reciter used when none is configured
pub const DEFAULT_RECITER: &str = "ar.alafasy";

pub(crate) fn validate_chapter(number: u32) -> Result<()> {
    if (1..=CHAPTER_COUNT).contains(&number) {
        Ok(())
    } else {
        Err(ReaderError::invalid_input(format!(
            "Chapter number must be between 1 and {}, got {}",
            CHAPTER_COUNT, number
        )))
    }
}

fn validate_verse(number: u32) -> Result<()> {
    if number == 0 {
        return Err(ReaderError::invalid_input("Verse number must be at least 1"));
    }
    Ok(())
}

fn validate_edition(edition: &str) -> Result<()> {
    let valid = !edition.is_empty()
        && edition
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ReaderError::invalid_input(format!("Invalid edition identifier: '{}'", edition)))
    }
}

impl QuranClient {
    /// List every chapter
    pub async fn get_surahs(&self) -> Result<Vec<Chapter>> {
        self.get("/surah").await
    }

    /// Chapter text in the default script edition
    pub async fn get_surah(&self, number: u32) -> Result<ChapterText> {
        validate_chapter(number)?;
        self.get(&format!("/surah/{}", number)).await
    }

    /// Chapter text in the given translation edition (e.g. `en.asad`)
    pub async fn get_surah_with_translation(&self, number: u32, translation: &str) -> Result<ChapterText> {
        validate_chapter(number)?;
        validate_edition(translation)?;
        self.get(&format!("/surah/{}/{}", number, translation)).await
    }

    /// One verse in the given translation edition
    pub async fn get_ayah_with_translation(
        &self,
        surah: u32,
        ayah: u32,
        translation: &str,
    ) -> Result<EditionVerse> {
        validate_chapter(surah)?;
        validate_verse(ayah)?;
        validate_edition(translation)?;
        self.get(&format!("/ayah/{}:{}/{}", surah, ayah, translation)).await
    }

    /// Recitation clip for one verse by the given reciter (e.g. `ar.alafasy`)
    pub async fn get_ayah_audio(&self, surah: u32, ayah: u32, reciter: &str) -> Result<VerseAudio> {
        validate_chapter(surah)?;
        validate_verse(ayah)?;
        validate_edition(reciter)?;
        self.get(&format!("/ayah/{}:{}/{}", surah, ayah, reciter)).await
    }

    /// Search verse text in one edition
    ///
    /// The query is percent-encoded into the path. An empty query is rejected
    /// locally.
    pub async fn search_ayahs(&self, query: &str, translation: &str) -> Result<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ReaderError::invalid_input("Search query must not be empty"));
        }
        validate_edition(translation)?;
        self.get(&search_path(query, translation)).await
    }
}

fn search_path(query: &str, translation: &str) -> String {
    format!("/search/{}/all/{}", urlencoding::encode(query), translation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_chapter_bounds() {
        assert!(validate_chapter(1).is_ok());
        assert!(validate_chapter(114).is_ok());
        assert!(validate_chapter(0).is_err());
        assert!(validate_chapter(115).is_err());
    }

    #[test]
    fn test_validate_edition() {
        assert!(validate_edition("en.asad").is_ok());
        assert!(validate_edition("quran-uthmani").is_ok());
        assert!(validate_edition("").is_err());
        assert!(validate_edition("../admin").is_err());
        assert!(validate_edition("en asad").is_err());
    }

    #[test]
    fn test_search_path_encodes_query() {
        assert_eq!(search_path("abraham", "en.asad"), "/search/abraham/all/en.asad");
        assert_eq!(
            search_path("day of judgment", "en.sahih"),
            "/search/day%20of%20judgment/all/en.sahih"
        );
        assert_eq!(search_path("a/b", "en.sahih"), "/search/a%2Fb/all/en.sahih");
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_request() {
        // Unroutable base URL: any request that slipped through would be a network error
        let client = QuranClient::with_config(
            crate::api::ClientConfig::builder()
                .base_url("http://127.0.0.1:9/v1")
                .build(),
        )
        .unwrap();

        let err = client.get_surah(0).await.unwrap_err();
        assert!(matches!(err, ReaderError::InvalidInput(_)));

        let err = client.get_ayah_audio(2, 0, DEFAULT_RECITER).await.unwrap_err();
        assert!(matches!(err, ReaderError::InvalidInput(_)));

        let err = client.search_ayahs("   ", DEFAULT_TRANSLATION).await.unwrap_err();
        assert!(matches!(err, ReaderError::InvalidInput(_)));
    }
}
