//! Configuration file parser for ~/.config/taskdeck/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted but logged, since they are usually typos.
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides `api_token` from the file.
pub const API_TOKEN_ENV: &str = "TASKDECK_API_TOKEN";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// Every field has a default, so any subset of keys can be given. Debug
/// output masks `api_token`.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the server exposing `/api/task/{id}`.
    pub api_base_url: String,

    /// Upper bound on one task request, in seconds.
    pub request_timeout_secs: u64,

    /// Number of cards on the board at startup.
    pub item_count: usize,

    /// Bearer token for the task endpoint. `TASKDECK_API_TOKEN` wins over this.
    pub api_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 20,
            item_count: 10,
            api_token: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("item_count", &self.item_count)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    const MAX_FILE_SIZE: u64 = 64 * 1024;

    const KNOWN_KEYS: [&'static str; 4] = [
        "api_base_url",
        "request_timeout_secs",
        "item_count",
        "api_token",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing or empty file → defaults
    /// - Invalid TOML → `ConfigError::Parse`
    /// - Out-of-range values → `ConfigError::Invalid`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            api_base_url = %config.api_base_url,
            item_count = config.item_count,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Reject values the board cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_count == 0 {
            return Err(ConfigError::Invalid("item_count must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Token from `TASKDECK_API_TOKEN`, falling back to `api_token`.
    pub fn api_token(&self) -> Option<SecretString> {
        self.token_with_env(std::env::var(API_TOKEN_ENV).ok())
    }

    fn token_with_env(&self, env_value: Option<String>) -> Option<SecretString> {
        env_value
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_token.clone())
            .map(SecretString::from)
    }
}

// ============================================================================
// Tests
// ============================================================================
