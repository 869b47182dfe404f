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


//! Persisted user data: settings, bookmarks, reading position
//!
//! Stored JSON keeps camelCase field names, the same shape the web client
//! writes to local storage.

use crate::api::quran::{DEFAULT_RECITER, DEFAULT_TRANSLATION};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Verse text size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    /// Text scale class used by renderers
    pub fn text_scale(&self) -> &'static str {
        match self {
            Self::Small => "text-sm",
            Self::Medium => "text-base",
            Self::Large => "text-lg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

/// Color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Display and playback preferences
///
/// Missing fields in stored JSON fall back to their defaults one by one, so a
/// loaded value always has all four populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub translation: String,
    pub reciter: String,
    pub font_size: FontSize,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            translation: DEFAULT_TRANSLATION.to_string(),
            reciter: DEFAULT_RECITER.to_string(),
            font_size: FontSize::default(),
            theme: Theme::default(),
        }
    }
}

/// A saved verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub surah_number: u32,
    pub surah_name: String,
    pub ayah_number: u32,
    /// Source text
    pub text: String,
    /// Translated text
    #[serde(default)]
    pub translation: String,
}

impl Bookmark {
    /// Uniqueness key
    pub fn key(&self) -> (u32, u32) {
        (self.surah_number, self.ayah_number)
    }
}

/// Ordered bookmark list without duplicate (chapter, verse) pairs
///
/// Deserialization drops duplicates, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Bookmark>", into = "Vec<Bookmark>")]
pub struct Bookmarks {
    items: Vec<Bookmark>,
}

impl From<Vec<Bookmark>> for Bookmarks {
    fn from(items: Vec<Bookmark>) -> Self {
        let mut list = Bookmarks::default();
        for bookmark in items {
            if !list.contains(bookmark.surah_number, bookmark.ayah_number) {
                list.items.push(bookmark);
            }
        }
        list
    }
}

impl From<Bookmarks> for Vec<Bookmark> {
    fn from(list: Bookmarks) -> Self {
        list.items
    }
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bookmark> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Bookmark] {
        &self.items
    }

    pub fn contains(&self, surah: u32, ayah: u32) -> bool {
        self.items.iter().any(|b| b.key() == (surah, ayah))
    }

    pub fn get(&self, surah: u32, ayah: u32) -> Option<&Bookmark> {
        self.items.iter().find(|b| b.key() == (surah, ayah))
    }

    /// Remove the bookmark with the same key, or append it if absent
    ///
    /// Returns `true` if the bookmark is present afterwards.
    pub fn toggle(&mut self, bookmark: Bookmark) -> bool {
        if self.remove(bookmark.surah_number, bookmark.ayah_number) {
            false
        } else {
            self.items.push(bookmark);
            true
        }
    }

    /// Returns `true` if something was removed
    pub fn remove(&mut self, surah: u32, ayah: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|b| b.key() != (surah, ayah));
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a Bookmarks {
    type Item = &'a Bookmark;
    type IntoIter = std::slice::Iter<'a, Bookmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Most recently opened chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRead {
    pub surah_number: u32,
    pub ayah_number: u32,
    pub surah_name: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl LastRead {
    /// Reading position stamped with the current time
    pub fn now(surah_number: u32, ayah_number: u32, surah_name: impl Into<String>) -> Self {
        Self {
            surah_number,
            ayah_number,
            surah_name: surah_name.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn read_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(surah: u32, ayah: u32) -> Bookmark {
        Bookmark {
            surah_number: surah,
            surah_name: format!("Surah {surah}"),
            ayah_number: ayah,
            text: "text".to_string(),
            translation: "translation".to_string(),
        }
    }

    #[test]
    fn test_settings_json_shape() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "translation": "en.asad",
                "reciter": "ar.alafasy",
                "fontSize": "medium",
                "theme": "dark"
            })
        );
    }

    #[test]
    fn test_settings_partial_document_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.translation, "en.asad");
        assert_eq!(settings.reciter, "ar.alafasy");
        assert_eq!(settings.font_size, FontSize::Medium);
    }

    #[test]
    fn test_settings_bad_enum_is_rejected() {
        assert!(serde_json::from_str::<Settings>(r#"{"fontSize":"huge"}"#).is_err());
    }

    #[test]
    fn test_toggle_twice_restores_list() {
        let mut list = Bookmarks::from(vec![bookmark(1, 1), bookmark(2, 255)]);
        let original = list.clone();

        assert!(list.toggle(bookmark(36, 1)));
        assert_eq!(list.len(), 3);
        assert!(!list.toggle(bookmark(36, 1)));
        assert_eq!(list, original);

        assert!(!list.toggle(bookmark(2, 255)));
        assert!(list.toggle(bookmark(2, 255)));
        // Re-added at the end
        assert_eq!(list.as_slice().last().unwrap().key(), (2, 255));
    }

    #[test]
    fn test_duplicates_dropped_on_load() {
        let json = serde_json::to_string(&vec![bookmark(1, 1), bookmark(1, 1), bookmark(1, 2)]).unwrap();
        let list: Bookmarks = serde_json::from_str(&json).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(1, 1));
        assert!(list.contains(1, 2));
    }

    #[test]
    fn test_bookmark_json_shape() {
        let json = serde_json::to_value(Bookmarks::from(vec![bookmark(2, 255)])).unwrap();
        assert_eq!(json[0]["surahNumber"], 2);
        assert_eq!(json[0]["ayahNumber"], 255);
        assert_eq!(json[0]["surahName"], "Surah 2");
    }

    #[test]
    fn test_remove_and_clear() {
        let mut list = Bookmarks::from(vec![bookmark(1, 1), bookmark(1, 2)]);
        assert!(list.remove(1, 1));
        assert!(!list.remove(1, 1));
        assert_eq!(list.len(), 1);
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_theme_and_font_size() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::parse("LIGHT"), Some(Theme::Light));
        assert_eq!(FontSize::parse("large"), Some(FontSize::Large));
        assert_eq!(FontSize::parse("tiny"), None);
        assert_eq!(FontSize::Small.text_scale(), "text-sm");
    }

    #[test]
    fn test_last_read_timestamp() {
        let last = LastRead::now(18, 1, "Al-Kahf");
        let read_at = last.read_at().unwrap();
        assert!((Utc::now() - read_at).num_seconds() < 5);
    }
}
