//! Application configuration
//!
//! Where the posts API lives and how fast effect jobs are polled.

use std::time::Duration;
use thiserror::Error;

/// Default API location, matching the frontend server's default port
pub const DEFAULT_API_BASE: &str = "http://localhost:8045";

/// Default delay between job status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api_base cannot be empty")]
    EmptyApiBase,

    #[error("api_base must start with http:// or https:// (got '{0}')")]
    InvalidScheme(String),

    #[error("poll_interval must be greater than 0")]
    ZeroPollInterval,
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL the `/api/...` endpoints hang off (e.g., "http://localhost:8045")
    pub api_base: String,

    /// How long to wait before each job status request
    pub poll_interval: Duration,
}

impl AppConfig {
    pub fn new(api_base: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            api_base: api_base.into(),
            poll_interval,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.is_empty() {
            return Err(ConfigError::EmptyApiBase);
        }

        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ConfigError::InvalidScheme(self.api_base.clone()));
        }

        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_POLL_INTERVAL)
    }
}
