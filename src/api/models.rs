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


//! Response models for the alquran.cloud API
//!
//! Field names follow the API's camelCase JSON via `serde(rename_all)`.
//! Every endpoint wraps its payload in an [`Envelope`]; the client unwraps it
//! and hands back only `data`.

use serde::{Deserialize, Deserializer, Serialize};

/// Number of chapters in the text
pub const CHAPTER_COUNT: u32 = 114;

/// Response wrapper used by every endpoint
///
/// `data` is left as a raw value so that error envelopes (where `data` is a
/// message string) can be told apart from payloads before typed decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub code: u16,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Where a chapter was revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevelationType {
    Meccan,
    Medinan,
    #[serde(untagged)]
    Other(String),
}

impl RevelationType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Meccan => "Meccan",
            Self::Medinan => "Medinan",
            Self::Other(s) => s,
        }
    }
}

/// Chapter summary as returned by `/surah`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    /// Native (Arabic) name
    pub name: String,
    /// Transliterated name
    pub english_name: String,
    /// Translated title
    pub english_name_translation: String,
    pub number_of_ayahs: u32,
    pub revelation_type: RevelationType,
}

/// Text edition descriptor (a translation, a script, or an audio reciter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edition {
    pub identifier: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub english_name: String,
    #[serde(default)]
    pub format: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A single verse with its locational markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    /// Position in the whole text (1..=6236)
    pub number: u32,
    pub text: String,
    pub number_in_surah: u32,
    #[serde(default)]
    pub juz: u32,
    #[serde(default)]
    pub manzil: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub ruku: u32,
    #[serde(default)]
    pub hizb_quarter: u32,
    /// Prostration flag; the API sends `false` or a descriptor object
    #[serde(default, deserialize_with = "deserialize_sajda")]
    pub sajda: bool,
}

/// Full chapter text in one edition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterText {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub number_of_ayahs: u32,
    pub revelation_type: RevelationType,
    pub ayahs: Vec<Verse>,
    #[serde(default)]
    pub edition: Option<Edition>,
}

impl ChapterText {
    /// Chapter summary without the verses
    pub fn summary(&self) -> Chapter {
        Chapter {
            number: self.number,
            name: self.name.clone(),
            english_name: self.english_name.clone(),
            english_name_translation: self.english_name_translation.clone(),
            number_of_ayahs: self.number_of_ayahs,
            revelation_type: self.revelation_type.clone(),
        }
    }
}

/// Single verse in one edition, as returned by `/ayah/{s}:{a}/{edition}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionVerse {
    #[serde(flatten)]
    pub verse: Verse,
    pub surah: Chapter,
    #[serde(default)]
    pub edition: Option<Edition>,
}

/// Verse with recitation audio, as returned for audio editions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseAudio {
    #[serde(flatten)]
    pub verse: Verse,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub audio_secondary: Vec<String>,
    #[serde(default)]
    pub surah: Option<Chapter>,
    #[serde(default)]
    pub edition: Option<Edition>,
}

impl VerseAudio {
    /// Primary clip URL, falling back to the first secondary one
    pub fn clip_url(&self) -> Option<&str> {
        self.audio
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.audio_secondary.first().map(String::as_str))
    }
}

/// One hit from `/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub number: u32,
    pub text: String,
    pub number_in_surah: u32,
    pub surah: Chapter,
    #[serde(default)]
    pub edition: Option<Edition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub count: u32,
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
}

fn deserialize_sajda<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Sajda {
        Flag(bool),
        Detail(serde_json::Map<String, serde_json::Value>),
    }

    Ok(match Sajda::deserialize(deserializer)? {
        Sajda::Flag(flag) => flag,
        // A descriptor object is only sent for verses that carry a prostration
        Sajda::Detail(_) => true,
    })
}
