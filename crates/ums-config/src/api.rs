//! Backend API connection settings.
//!
//! # Configuration
//!
//! - `UMS_API_URL`: Base URL of the UMS REST API (default: `http://localhost:3000/api`)
//! - `UMS_API_TOKEN`: Bearer token sent with every request (optional)
//! - `UMS_REQUEST_TIMEOUT_SECS`: Per-request timeout in seconds (default: 30)

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Creates a new `ApiConfig` from environment variables.
    ///
    /// Falls back to default values if variables are not set or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("UMS_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            token: std::env::var("UMS_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            timeout_secs: std::env::var("UMS_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Points the config at another base URL, keeping other settings.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
