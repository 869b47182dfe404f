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


//! Application configuration management
//!
//! Stored as `config.json` in the platform config directory. A missing file
//! yields the defaults; `ALMUMIN_API_BASE_URL` overrides the API base URL.

use crate::api::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::audio::sink::default_player_command;
use crate::error::{ReaderError, Result};
use crate::reader::catalog::DEFAULT_PAGE_SIZE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `api_base_url`
pub const API_BASE_URL_ENV: &str = "ALMUMIN_API_BASE_URL";

const CONFIG_FILE: &str = "config.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "almumin", "AlMumin")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// `None` uses the client's default user agent
    pub user_agent: Option<String>,
    /// Where settings, bookmarks and reading position are stored
    pub data_dir: Option<PathBuf>,
    /// Chapters per page in the list view
    pub page_size: usize,
    /// External player argv; the clip URL is appended
    pub player_command: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            data_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
            player_command: default_player_command(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the platform config directory, then apply the environment
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            ReaderError::ConfigurationError("Could not determine config directory".to_string())
        })?;
        let mut config = Self::load_from(&path)?;
        config.apply_env();
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            ReaderError::ConfigurationError(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    /// Save to the platform config directory
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            ReaderError::ConfigurationError("Could not determine config directory".to_string())
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder()
            .base_url(self.api_base_url.clone())
            .timeout(Duration::from_secs(self.request_timeout_secs.max(1)));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Storage directory: the override, else the platform data directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("almumin-data"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 12);
        assert_eq!(config.player_command[0], "ffplay");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            page_size: 20,
            data_dir: Some(dir.path().join("data")),
            player_command: vec!["mpv".to_string(), "--no-video".to_string()],
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.data_dir(), dir.path().join("data"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"request_timeout_secs": 5}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.client_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ReaderError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_client_config_carries_user_agent() {
        let config = AppConfig {
            user_agent: Some("almumin-test".to_string()),
            api_base_url: "http://localhost:8080/v1".to_string(),
            ..Default::default()
        };
        let client = config.client_config();
        assert_eq!(client.user_agent, "almumin-test");
        assert_eq!(client.base_url, "http://localhost:8080/v1");
    }
}
