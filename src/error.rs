//! Error types for the AlMumin reader core
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are grouped by where they surface: the remote content API, the
//! persisted store, user input, and audio playback.
//!
//! ## Policy
//!
//! - Network and parse failures are logged at the call site and handed back to
//!   the caller, which turns them into an in-view error state.
//! - Malformed persisted data never reaches this type: the store falls back to
//!   the default value instead (see `storage::persisted`).
//! - Nothing here is fatal. Every error is scoped to the view or store access
//!   that triggered it.

use thiserror::Error;

/// Result type alias using our ReaderError type
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Main error type for the reader core
#[derive(Error, Debug)]
pub enum ReaderError {
    // ===== API Errors =====

    /// Transport-level failure (DNS, connect, timeout, reset)
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
        /// Whether this error might be transient
        is_transient: bool,
    },

    /// Server answered with a failure status, either on the HTTP line or in
    /// the envelope's `code` field
    #[error("API request failed: {message}")]
    ApiRequestFailed {
        message: String,
        /// HTTP (or envelope) status code if available
        status_code: Option<u16>,
        /// API endpoint that failed
        endpoint: Option<String>,
    },

    /// Body was not JSON, or did not carry the expected payload
    #[error("Invalid API response: {message}")]
    InvalidApiResponse {
        message: String,
        /// Response body snippet for debugging
        response_body: Option<String>,
    },

    // ===== Storage Errors =====

    /// Persistent storage backend failed to read or write
    #[error("Storage error: {0}")]
    StorageError(String),

    // ===== Input/State Errors =====

    /// Generic input validation error
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ===== Audio Errors =====

    /// Reciter has no clip for the requested verse
    #[error("No audio available for verse {surah}:{ayah}")]
    AudioUnavailable { surah: u32, ayah: u32 },

    /// External player failed to start or exited abnormally
    #[error("Audio player error: {0}")]
    PlayerError(String),

    // ===== General Errors =====

    /// Operation was cancelled because its owner went away
    #[error("Operation cancelled")]
    Cancelled,

    /// Internal error that should not normally occur
    #[error("Internal error: {0}")]
    InternalError(String),

    // ===== External Library Errors =====

    /// HTTP client error from reqwest
    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<std::num::ParseIntError> for ReaderError {
    fn from(err: std::num::ParseIntError) -> Self {
        ReaderError::InvalidInput(format!("Failed to parse integer: {}", err))
    }
}

impl From<tokio::task::JoinError> for ReaderError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            ReaderError::Cancelled
        } else {
            ReaderError::InternalError(format!("Background task panicked: {}", err))
        }
    }
}

// Helper methods for creating common errors
impl ReaderError {
    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        ReaderError::InvalidInput(message.into())
    }

    /// Create a NotFound error with a resource name
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        ReaderError::NotFound(resource.into())
    }

    /// Create an InternalError with a message
    pub fn internal<S: Into<String>>(message: S) -> Self {
        ReaderError::InternalError(message.into())
    }

    /// Create an ApiRequestFailed error
    pub fn api_failed<S: Into<String>>(
        message: S,
        status_code: Option<u16>,
        endpoint: Option<String>,
    ) -> Self {
        ReaderError::ApiRequestFailed {
            message: message.into(),
            status_code,
            endpoint,
        }
    }

    /// Create a NetworkError
    pub fn network_error<S: Into<String>>(message: S, is_transient: bool) -> Self {
        ReaderError::NetworkError {
            message: message.into(),
            is_transient,
        }
    }

    /// Create a StorageError
    pub fn storage<S: Into<String>>(message: S) -> Self {
        ReaderError::StorageError(message.into())
    }

    /// Check if error came from the transport or the remote server
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            ReaderError::NetworkError { .. }
                | ReaderError::ApiRequestFailed { .. }
                | ReaderError::ReqwestError(_)
        )
    }

    /// Check if error came from decoding a response body
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ReaderError::InvalidApiResponse { .. } | ReaderError::SerdeJsonError(_)
        )
    }

    /// Check if error is related to the persisted store
    pub fn is_storage_error(&self) -> bool {
        matches!(self, ReaderError::StorageError(_) | ReaderError::IoError(_))
    }

    /// Get user-friendly error message suitable for display
    ///
    /// Technical details are dropped where they would not help the reader.
    pub fn user_message(&self) -> String {
        match self {
            ReaderError::NetworkError { .. } | ReaderError::ReqwestError(_) => {
                "Connection error. Please check your internet connection and try again.".to_string()
            }
            ReaderError::ApiRequestFailed { status_code: Some(404), .. } => {
                "The requested chapter or verse could not be found.".to_string()
            }
            ReaderError::ApiRequestFailed { status_code: Some(500..=599), .. } => {
                "The Quran service is having trouble right now. Please try again later.".to_string()
            }
            ReaderError::InvalidApiResponse { .. } | ReaderError::SerdeJsonError(_) => {
                "Received an unexpected response format from the server.".to_string()
            }
            ReaderError::AudioUnavailable { surah, ayah } => {
                format!("No recitation is available for verse {}:{}.", surah, ayah)
            }
            ReaderError::PlayerError(_) => {
                "Audio could not be played. Make sure ffplay (or your configured player) is installed.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert!(ReaderError::network_error("dns", true).is_network_error());
        assert!(ReaderError::api_failed("gone", Some(404), None).is_network_error());
        assert!(!ReaderError::invalid_input("x").is_network_error());

        let parse = ReaderError::InvalidApiResponse {
            message: "missing data".to_string(),
            response_body: None,
        };
        assert!(parse.is_parse_error());
        assert!(!parse.is_network_error());

        assert!(ReaderError::storage("disk full").is_storage_error());
    }

    #[test]
    fn test_user_message() {
        let not_found = ReaderError::api_failed("Not Found", Some(404), Some("/surah/999".into()));
        assert!(not_found.user_message().contains("could not be found"));

        let audio = ReaderError::AudioUnavailable { surah: 2, ayah: 255 };
        assert_eq!(audio.user_message(), "No recitation is available for verse 2:255.");

        let other = ReaderError::invalid_input("chapter must be 1..=114");
        assert_eq!(other.user_message(), "Invalid input: chapter must be 1..=114");
    }

    #[test]
    fn test_parse_int_conversion() {
        let err: ReaderError = "abc".parse::<u32>().unwrap_err().into();
        assert!(matches!(err, ReaderError::InvalidInput(_)));
    }
}
