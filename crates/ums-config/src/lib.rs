//! # UMS Config
//!
//! Configuration types for the UMS console, loaded from environment variables:
//!
//! - [`api`]: Backend base URL, token and request timeout
//! - [`console`]: Validation limits and error display timing
//!
//! # Example
//!
//! ```ignore
//! use ums_config::{ApiConfig, ConsoleConfig};
//!
//! let api = ApiConfig::from_env();
//! let console = ConsoleConfig::from_env();
//! ```

pub mod api;
pub mod console;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use console::{ConsoleConfig, MIN_PASSWORD_LEN};
