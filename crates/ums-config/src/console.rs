//! Console behaviour limits.
//!
//! # Configuration
//!
//! - `UMS_ERROR_DISMISS_SECS`: Seconds before a store error clears itself (default: 5)
//! - `UMS_ROLE_NAME_MAX_LEN`: Maximum role name length (default: 50)
//! - `UMS_ROLE_DESCRIPTION_MAX_LEN`: Maximum role description length (default: 200)
//! - `UMS_LOG_DIR`: Directory for rolling log files (default: `storage/logs`)

use std::time::Duration;

/// Minimum password length for role users.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub error_dismiss_secs: u64,
    pub role_name_max_len: usize,
    pub role_description_max_len: usize,
    pub log_dir: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            error_dismiss_secs: 5,
            role_name_max_len: 50,
            role_description_max_len: 200,
            log_dir: "storage/logs".to_string(),
        }
    }
}

impl ConsoleConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            error_dismiss_secs: std::env::var("UMS_ERROR_DISMISS_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.error_dismiss_secs),
            role_name_max_len: std::env::var("UMS_ROLE_NAME_MAX_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.role_name_max_len),
            role_description_max_len: std::env::var("UMS_ROLE_DESCRIPTION_MAX_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.role_description_max_len),
            log_dir: std::env::var("UMS_LOG_DIR").unwrap_or(defaults.log_dir),
        }
    }

    pub fn error_dismiss_after(&self) -> Duration {
        Duration::from_secs(self.error_dismiss_secs)
    }
}
