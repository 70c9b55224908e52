//! `AppConfig` struct, TOML loading, and validation.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Default TMDB v3 base URL.
const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default environment variable holding the TMDB API key.
const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Configuration validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// `server.port` is zero.
    #[error("server.port cannot be 0")]
    InvalidPort,

    /// `tmdb.timeout_secs` is zero.
    #[error("tmdb.timeout_secs cannot be 0")]
    ZeroTimeout,

    /// `tmdb.base_url` would drop its last path segment on join.
    #[error("tmdb.base_url must end with '/': {0}")]
    BaseUrlWithoutTrailingSlash(String),

    /// `tmdb.api_key_env` is empty.
    #[error("tmdb.api_key_env cannot be empty")]
    EmptyApiKeyEnv,
}

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream TMDB settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
    /// Include the underlying error text in 500 responses.
    pub expose_error_details: bool,
    /// Answer CORS preflights for any origin.
    pub cors_allow_any_origin: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 5000,
            expose_error_details: true,
            cors_allow_any_origin: false,
        }
    }
}

/// Upstream TMDB configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// Base URL requests are resolved against.
    pub base_url: Url,
    /// Timeout for one upstream request/response cycle, in seconds.
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for TmdbConfig {
    #[allow(clippy::expect_used)] // constant URL
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_TMDB_BASE_URL).expect("default TMDB base URL is valid"),
            timeout_secs: 10,
            api_key_env: String::from(DEFAULT_API_KEY_ENV),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.server.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.tmdb.timeout_secs == 0 {
            return Err(ValidationError::ZeroTimeout);
        }
        if !self.tmdb.base_url.path().ends_with('/') {
            return Err(ValidationError::BaseUrlWithoutTrailingSlash(String::from(
                self.tmdb.base_url.as_str(),
            )));
        }
        if self.tmdb.api_key_env.is_empty() {
            return Err(ValidationError::EmptyApiKeyEnv);
        }
        Ok(())
    }
}
