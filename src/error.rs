//! Error types for transcript-chat
//!
//! This module defines the error types used throughout the client,
//! using `thiserror` for ergonomic error handling.
//!
//! Storage failures never reach callers of the session store: they are
//! logged and recovered locally. The `Storage` variant is raised by the
//! backends themselves.

use thiserror::Error;

/// Main error type for transcript-chat operations
#[derive(Error, Debug)]
pub enum TranscriptChatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected locally before any network call
    #[error("{title}: {message}")]
    Validation {
        /// Short notice title ("Transcript too short")
        title: String,
        /// Human readable explanation
        message: String,
    },

    /// The remote API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Server-provided `error` field, or a generic fallback
        message: String,
    },

    /// Key-value backend errors (never escape the session store)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Interactive command errors
    #[error("Command error: {0}")]
    Command(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API base URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl TranscriptChatError {
    /// Build a validation error from a notice title and message
    pub fn validation(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Message to surface to the user, without the variant prefix
    ///
    /// API errors show the server message only, matching what the backend
    /// put in its `error` field.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for transcript-chat operations
///
/// Uses `anyhow::Error` so callers can attach context; typed variants are
/// recovered with `downcast_ref::<TranscriptChatError>()`.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = TranscriptChatError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_validation_error_display() {
        let error = TranscriptChatError::validation(
            "Transcript too short",
            "Please provide a longer, valid meeting transcript.",
        );
        assert_eq!(
            error.to_string(),
            "Transcript too short: Please provide a longer, valid meeting transcript."
        );
        assert_eq!(
            error.user_message(),
            "Please provide a longer, valid meeting transcript."
        );
    }

    #[test]
    fn test_api_error_display() {
        let error = TranscriptChatError::Api {
            status: 404,
            message: "Session not found".to_string(),
        };
        assert_eq!(error.to_string(), "API error (404): Session not found");
        assert_eq!(error.user_message(), "Session not found");
    }

    #[test]
    fn test_storage_error_display() {
        let error = TranscriptChatError::Storage("database locked".to_string());
        assert_eq!(error.to_string(), "Storage error: database locked");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: TranscriptChatError = io_error.into();
        assert!(matches!(error, TranscriptChatError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: TranscriptChatError = json_error.into();
        assert!(matches!(error, TranscriptChatError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: TranscriptChatError = yaml_error.into();
        assert!(matches!(error, TranscriptChatError::Yaml(_)));
    }

    #[test]
    fn test_url_error_conversion() {
        let url_error = url::Url::parse("not a url").unwrap_err();
        let error: TranscriptChatError = url_error.into();
        assert!(matches!(error, TranscriptChatError::Url(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TranscriptChatError>();
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = TranscriptChatError::validation("No transcript provided", "x").into();
        assert!(matches!(
            err.downcast_ref::<TranscriptChatError>(),
            Some(TranscriptChatError::Validation { .. })
        ));
    }
}
