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


//! Preferences form
//!
//! Translation and reciter choices are limited to the catalogs below; every
//! change is written through the store immediately.

use crate::error::{ReaderError, Result};
use crate::storage::models::{FontSize, Settings, Theme};
use crate::storage::store::Store;
use tracing::debug;

/// Selectable edition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub language: &'static str,
}

pub const TRANSLATIONS: &[CatalogEntry] = &[
    CatalogEntry { id: "en.asad", name: "Muhammad Asad", language: "English" },
    CatalogEntry { id: "en.pickthall", name: "Pickthall", language: "English" },
    CatalogEntry { id: "en.sahih", name: "Sahih International", language: "English" },
    CatalogEntry { id: "ru.kuliev", name: "Кулиев", language: "Russian" },
    CatalogEntry { id: "ru.porokhova", name: "Порохова", language: "Russian" },
    CatalogEntry { id: "uz.sodik", name: "Мухаммад Содик Мухаммад Юсуф", language: "Uzbek" },
];

pub const RECITERS: &[CatalogEntry] = &[
    CatalogEntry { id: "ar.alafasy", name: "Mishary Rashid Alafasy", language: "Arabic" },
    CatalogEntry { id: "ar.husary", name: "Mahmoud Khalil Al-Husary", language: "Arabic" },
    CatalogEntry { id: "ar.sudais", name: "Abdul Rahman As-Sudais", language: "Arabic" },
    CatalogEntry { id: "ar.minshawi", name: "Muhammad Siddiq Al-Minshawi", language: "Arabic" },
];

pub fn find_translation(id: &str) -> Option<&'static CatalogEntry> {
    TRANSLATIONS.iter().find(|e| e.id == id)
}

pub fn find_reciter(id: &str) -> Option<&'static CatalogEntry> {
    RECITERS.iter().find(|e| e.id == id)
}

#[derive(Debug, Clone)]
pub struct SettingsForm {
    store: Store,
}

impl SettingsForm {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn current(&self) -> Settings {
        self.store.settings()
    }

    /// # Errors
    /// `InvalidInput` if `id` is not in [`TRANSLATIONS`]
    pub fn set_translation(&self, id: &str) -> Result<()> {
        let entry = find_translation(id)
            .ok_or_else(|| ReaderError::invalid_input(format!("Unknown translation: {}", id)))?;
        debug!(translation = entry.id, "translation changed");
        self.store.update_settings(|s| s.translation = entry.id.to_string())
    }

    /// # Errors
    /// `InvalidInput` if `id` is not in [`RECITERS`]
    pub fn set_reciter(&self, id: &str) -> Result<()> {
        let entry = find_reciter(id)
            .ok_or_else(|| ReaderError::invalid_input(format!("Unknown reciter: {}", id)))?;
        debug!(reciter = entry.id, "reciter changed");
        self.store.update_settings(|s| s.reciter = entry.id.to_string())
    }

    pub fn set_font_size(&self, size: FontSize) -> Result<()> {
        self.store.update_settings(|s| s.font_size = size)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.store.update_settings(|s| s.theme = theme)
    }

    /// Returns the new theme
    pub fn toggle_theme(&self) -> Result<Theme> {
        self.store.update_settings(|s| {
            s.theme = s.theme.toggled();
            s.theme
        })
    }

    pub fn reset_to_defaults(&self) -> Result<()> {
        self.store.set_settings(&Settings::default())
    }
}
