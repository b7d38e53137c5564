//! Configuration
//!
//! Command-line flags with environment fallbacks. A `.env` file in the working directory is
//! loaded before parsing.

use std::time::Duration;

use clap::Args;
use reqwest::Url;
use thiserror::Error;

/// Default backend location.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Errors raised while interpreting configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The backend URL could not be parsed.
    #[error("invalid API URL {url:?}: {reason}")]
    InvalidApiUrl {
        /// Value as configured
        url: String,

        /// Parser message
        reason: String,
    },

    /// The backend URL cannot carry a path, e.g. `mailto:`.
    #[error("API URL {0:?} cannot be used as a base URL")]
    NotABase(String),

    /// A zero request timeout.
    #[error("API timeout must be at least one second")]
    ZeroTimeout,
}

/// Backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the MIMS REST backend
    #[arg(long, env = "MIMS_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "MIMS_API_TIMEOUT_SECONDS", default_value_t = 15_u64)]
    pub api_timeout_seconds: u64,

    /// Bearer token from an earlier `login`
    #[arg(long, env = "MIMS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl ApiConfig {
    /// Parsed base URL, always ending in `/` so endpoint paths join below it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] or [`ConfigError::NotABase`] for unusable values.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(self.api_url.trim()).map_err(|error| {
            ConfigError::InvalidApiUrl {
                url: self.api_url.clone(),
                reason: error.to_string(),
            }
        })?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::NotABase(self.api_url.clone()));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    /// Request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] when the timeout is zero.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        if self.api_timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Duration::from_secs(self.api_timeout_seconds))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout_seconds: 15,
            token: None,
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
