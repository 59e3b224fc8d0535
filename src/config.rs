//! Configuration management for transcript-chat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TranscriptChatError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote backend settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Local session store settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Upload and chat behavior
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Remote backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the transcript chat backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; unset leaves the transport default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://codeaza-meeting-bot-fastapibackend.vercel.app".to_string()
}

fn default_user_agent() -> String {
    format!("transcript-chat/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Which key-value backend holds local data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// SQLite file in the user's data directory
    #[default]
    Sqlite,
    /// Process memory; everything is lost on exit
    Memory,
}

impl std::str::FromStr for StorageBackendKind {
    type Err = TranscriptChatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(TranscriptChatError::Config(format!(
                "Invalid storage backend: {}. Must be one of: sqlite, memory",
                other
            ))),
        }
    }
}

/// Local store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind
    #[serde(default)]
    pub backend: StorageBackendKind,

    /// Explicit database path for the SQLite backend
    #[serde(default)]
    pub path: Option<String>,
}

/// Upload and chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Shortest transcript accepted for upload, in characters
    #[serde(default = "default_min_transcript_length")]
    pub min_transcript_length: usize,

    /// Number of leading transcript characters kept as a preview
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,

    /// Probe the backend when an interactive session starts
    #[serde(default = "default_check_health_on_start")]
    pub check_health_on_start: bool,
}

fn default_min_transcript_length() -> usize {
    10
}

fn default_preview_length() -> usize {
    100
}

fn default_check_health_on_start() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            min_transcript_length: default_min_transcript_length(),
            preview_length: default_preview_length(),
            check_health_on_start: default_check_health_on_start(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TranscriptChatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TranscriptChatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("TRANSCRIPT_CHAT_API_BASE") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("TRANSCRIPT_CHAT_API_TIMEOUT") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = Some(value);
            } else {
                tracing::warn!("Invalid TRANSCRIPT_CHAT_API_TIMEOUT: {}", timeout);
            }
        }

        if let Ok(backend) = std::env::var("TRANSCRIPT_CHAT_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(kind) => self.storage.backend = kind,
                Err(e) => tracing::warn!("Ignoring TRANSCRIPT_CHAT_STORAGE_BACKEND: {}", e),
            }
        }

        if let Ok(path) = std::env::var(crate::storage::backend::STORE_DB_ENV) {
            self.storage.path = Some(path);
        }

        if let Ok(min_length) = std::env::var("TRANSCRIPT_CHAT_MIN_TRANSCRIPT_LENGTH") {
            if let Ok(value) = min_length.parse() {
                self.chat.min_transcript_length = value;
            } else {
                tracing::warn!("Invalid TRANSCRIPT_CHAT_MIN_TRANSCRIPT_LENGTH: {}", min_length);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_base) = &cli.api_base {
            self.api.base_url = api_base.clone();
        }
        if let Some(storage_path) = &cli.storage_path {
            self.storage.path = Some(storage_path.clone());
        }
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            TranscriptChatError::Config(format!("Invalid api.base_url {}: {}", self.api.base_url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(TranscriptChatError::Config(format!(
                "api.base_url must use http or https, got {}",
                url.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == Some(0) {
            return Err(TranscriptChatError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.min_transcript_length == 0 {
            return Err(TranscriptChatError::Config(
                "chat.min_transcript_length must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.preview_length == 0 {
            return Err(TranscriptChatError::Config(
                "chat.preview_length must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
