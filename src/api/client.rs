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


//! HTTP client for the alquran.cloud API
//!
//! Thin wrapper over `reqwest::Client`:
//! - Fixed base URL (overridable for mirrors and tests)
//! - One GET per call; no retries, no caching, no rate limiting
//! - Every response is a JSON envelope `{ code, status, data }` and only
//!   `data` is handed back
//!
//! Failures are logged with `tracing` and returned to the caller unchanged,
//! so a view can show its own error state.

use crate::api::models::Envelope;
use crate::error::{ReaderError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Public API root
pub const DEFAULT_BASE_URL: &str = "https://api.alquran.cloud/v1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of body characters kept on a parse error
const BODY_SNIPPET_CHARS: usize = 800;

/// Configuration for QuranClient
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("almumin/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Read-only client for chapter text, translations, audio and search
///
/// # Example
/// ```rust,no_run
/// use almumin_core::api::QuranClient;
///
/// # async fn example() -> almumin_core::error::Result<()> {
/// let client = QuranClient::new()?;
/// let chapters = client.get_surahs().await?;
/// println!("{} chapters", chapters.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QuranClient {
    client: Client,
    base_url: String,
}

impl QuranClient {
    /// Create a client against the public API
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    ///
    /// # Errors
    /// Returns error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let parsed = url::Url::parse(&config.base_url)
            .map_err(|e| ReaderError::invalid_input(format!("Invalid base URL '{}': {}", config.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ReaderError::invalid_input(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ReaderError::invalid_input(format!("Invalid user agent: {}", e)))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Perform a GET request and unwrap the envelope payload
    ///
    /// # Errors
    /// - `NetworkError` if the request could not be sent or the body not read
    /// - `ApiRequestFailed` on a non-2xx status or an error envelope
    /// - `InvalidApiResponse` if the body is not a payload envelope of type `T`
    pub async fn get<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint);
        debug!(%url, "GET");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(endpoint, error = %e, "request failed");
                return Err(ReaderError::network_error(
                    format!("Network request failed: {}", e),
                    e.is_timeout() || e.is_connect(),
                ));
            }
        };

        let result = self.handle_response(endpoint, response).await;
        if let Err(ref e) = result {
            error!(endpoint, error = %e, "API call failed");
        }
        result
    }

    async fn handle_response<T>(&self, endpoint: &str, response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ReaderError::network_error(format!("Failed to read response body: {}", e), true)
        })?;

        if !status.is_success() {
            // Error envelopes carry a readable message in `data`
            let message = serde_json::from_str::<Envelope>(&body)
                .ok()
                .and_then(|env| env.data)
                .and_then(|d| d.as_str().map(str::to_string))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(ReaderError::api_failed(
                message,
                Some(status.as_u16()),
                Some(endpoint.to_string()),
            ));
        }

        parse_envelope(endpoint, &body)
    }
}

/// Decode an envelope body into its payload
pub(crate) fn parse_envelope<T>(endpoint: &str, body: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| ReaderError::InvalidApiResponse {
        message: format!("Response is not a JSON envelope: {}", e),
        response_body: Some(snippet(body)),
    })?;

    if envelope.code >= 400 {
        let message = envelope
            .data
            .as_ref()
            .and_then(|d| d.as_str())
            .unwrap_or(&envelope.status)
            .to_string();
        return Err(ReaderError::api_failed(
            message,
            Some(envelope.code),
            Some(endpoint.to_string()),
        ));
    }

    let data = envelope.data.ok_or_else(|| ReaderError::InvalidApiResponse {
        message: "Envelope has no data field".to_string(),
        response_body: Some(snippet(body)),
    })?;

    serde_json::from_value(data).map_err(|e| ReaderError::InvalidApiResponse {
        message: format!("Unexpected payload shape: {}", e),
        response_body: Some(snippet(body)),
    })
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

// ===== TESTS =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Chapter;

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:8080/v1/")
            .timeout(Duration::from_secs(5))
            .user_agent("TestAgent/1.0")
            .build();

        assert_eq!(config.base_url, "http://localhost:8080/v1/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "TestAgent/1.0");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = QuranClient::with_config(
            ClientConfig::builder().base_url("http://localhost:8080/v1/").build(),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
        assert_eq!(client.endpoint_url("/surah"), "http://localhost:8080/v1/surah");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let result = QuranClient::with_config(ClientConfig::builder().base_url("not a url").build());
        assert!(matches!(result, Err(ReaderError::InvalidInput(_))));

        let result = QuranClient::with_config(ClientConfig::builder().base_url("ftp://x/v1").build());
        assert!(matches!(result, Err(ReaderError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_envelope_payload() {
        let body = r#"{"code":200,"status":"OK","data":[{"number":114,"name":"سُورَةُ النَّاسِ",
            "englishName":"An-Naas","englishNameTranslation":"Mankind","numberOfAyahs":6,
            "revelationType":"Meccan"}]}"#;
        let chapters: Vec<Chapter> = parse_envelope("/surah", body).unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].english_name, "An-Naas");
    }

    #[test]
    fn test_parse_envelope_error_code() {
        let body = r#"{"code":404,"status":"NOT FOUND","data":"Surah number should be between 1 and 114."}"#;
        let err = parse_envelope::<Vec<Chapter>>("/surah/999", body).unwrap_err();
        match err {
            ReaderError::ApiRequestFailed { message, status_code, endpoint } => {
                assert_eq!(status_code, Some(404));
                assert!(message.contains("between 1 and 114"));
                assert_eq!(endpoint.as_deref(), Some("/surah/999"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_envelope_malformed() {
        let err = parse_envelope::<Vec<Chapter>>("/surah", "<html>gateway</html>").unwrap_err();
        assert!(err.is_parse_error());

        let err = parse_envelope::<Vec<Chapter>>("/surah", r#"{"code":200,"status":"OK"}"#).unwrap_err();
        assert!(err.is_parse_error());

        let err = parse_envelope::<Vec<Chapter>>("/surah", r#"{"code":200,"status":"OK","data":{"x":1}}"#)
            .unwrap_err();
        assert!(err.is_parse_error());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let client = QuranClient::with_config(
            ClientConfig::builder()
                .base_url("http://127.0.0.1:9/v1")
                .timeout(Duration::from_secs(2))
                .build(),
        )
        .unwrap();

        let err = client.get::<Vec<Chapter>>("/surah").await.unwrap_err();
        assert!(err.is_network_error());
    }
}
