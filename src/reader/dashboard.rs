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


//! Landing view: the "continue reading" card

use crate::reader::router::Route;
use crate::storage::models::LastRead;
use crate::storage::store::Store;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinueReading {
    pub surah_number: u32,
    pub surah_name: String,
    pub ayah_number: u32,
    pub read_at: Option<DateTime<Utc>>,
    pub route: Route,
}

impl From<&LastRead> for ContinueReading {
    fn from(last: &LastRead) -> Self {
        Self {
            surah_number: last.surah_number,
            surah_name: last.surah_name.clone(),
            ayah_number: last.ayah_number,
            read_at: last.read_at(),
            route: Route::chapter(last.surah_number),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dashboard {
    /// Absent until a chapter has been opened
    pub continue_reading: Option<ContinueReading>,
}

impl Dashboard {
    pub fn load(store: &Store) -> Self {
        Self {
            continue_reading: store.last_read().as_ref().map(ContinueReading::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_no_card() {
        assert_eq!(Dashboard::load(&Store::in_memory()), Dashboard::default());
    }

    #[test]
    fn test_card_routes_to_last_chapter() {
        let store = Store::in_memory();
        store.set_last_read(LastRead::now(18, 1, "Al-Kahf")).unwrap();

        let card = Dashboard::load(&store).continue_reading.unwrap();
        assert_eq!(card.surah_name, "Al-Kahf");
        assert_eq!(card.ayah_number, 1);
        assert_eq!(card.route, Route::ChapterDetail(18));
        assert!(card.read_at.is_some());
    }
}
