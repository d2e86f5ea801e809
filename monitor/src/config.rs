//! Dashboard configuration module.
//!
//! The dashboard talks to a single analytics API and refreshes on a fixed
//! cadence. Both have hardcoded defaults; front ends may override them.

use std::time::Duration;
use thiserror::Error;
use validator::Validate;

/// Base URL of the log-analytics API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Seconds between scheduled refresh cycles.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field failed validation.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Config {
    /// Base URL of the analytics API, without the `/api/...` suffix.
    #[validate(url(message = "API base URL must be an absolute URL"))]
    pub api_base_url: String,

    /// Seconds between scheduled refresh cycles.
    #[validate(range(min = 1, message = "Refresh interval must be at least one second"))]
    pub refresh_interval_secs: u64,
}

impl Config {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `api_base_url` is not an absolute URL
    /// - `refresh_interval_secs` is zero
    pub fn new(
        api_base_url: impl Into<String>,
        refresh_interval_secs: u64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            api_base_url: api_base_url.into(),
            refresh_interval_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the refresh cadence.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}
