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


//! Navigation routes
//!
//! | Path | Route |
//! |---|---|
//! | `/` | `ChapterList` |
//! | `/surah/{n}` | `ChapterDetail(n)`, `n` in 1..=114 |
//! | `/bookmarks` | `Bookmarks` |
//! | `/settings` | `Settings` |
//! | anything else | `NotFound(path)` |

use crate::api::models::CHAPTER_COUNT;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    ChapterList,
    ChapterDetail(u32),
    Bookmarks,
    Settings,
    NotFound(String),
}

impl Route {
    /// Resolve a path; never fails, unknown paths become `NotFound`
    ///
    /// Query strings, fragments and a trailing slash are ignored.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        match trimmed {
            "/" => Self::ChapterList,
            "/bookmarks" => Self::Bookmarks,
            "/settings" => Self::Settings,
            p => match p.strip_prefix("/surah/").and_then(parse_chapter_id) {
                Some(n) => Self::ChapterDetail(n),
                None => Self::NotFound(path.to_string()),
            },
        }
    }

    /// Canonical path; `Route::parse(&r.path()) == r` for every valid route
    pub fn path(&self) -> String {
        match self {
            Self::ChapterList => "/".to_string(),
            Self::ChapterDetail(n) => format!("/surah/{}", n),
            Self::Bookmarks => "/bookmarks".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Route for a chapter, or `NotFound` when out of range
    pub fn chapter(number: u32) -> Self {
        if (1..=CHAPTER_COUNT).contains(&number) {
            Self::ChapterDetail(number)
        } else {
            Self::NotFound(format!("/surah/{}", number))
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

fn parse_chapter_id(id: &str) -> Option<u32> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse::<u32>()
        .ok()
        .filter(|n| (1..=CHAPTER_COUNT).contains(n))
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::ChapterList);
        assert_eq!(Route::parse(""), Route::ChapterList);
        assert_eq!(Route::parse("/surah/1"), Route::ChapterDetail(1));
        assert_eq!(Route::parse("/surah/114/"), Route::ChapterDetail(114));
        assert_eq!(Route::parse("/bookmarks"), Route::Bookmarks);
        assert_eq!(Route::parse("/settings?tab=audio"), Route::Settings);
    }

    #[test]
    fn test_invalid_chapter_ids_are_not_found() {
        for path in ["/surah/0", "/surah/115", "/surah/abc", "/surah/-1", "/surah/", "/surah/1/2", "/surah/+5"] {
            assert!(Route::parse(path).is_not_found(), "{} should not resolve", path);
        }
        assert_eq!(Route::parse("/nope"), Route::NotFound("/nope".to_string()));
    }

    #[test]
    fn test_path_inverts_parse() {
        let routes = [
            Route::ChapterList,
            Route::ChapterDetail(36),
            Route::Bookmarks,
            Route::Settings,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn test_chapter_constructor() {
        assert_eq!(Route::chapter(2), Route::ChapterDetail(2));
        assert!(Route::chapter(200).is_not_found());
    }
}
