//! # UMS Core
//!
//! Core types, errors, and utilities for the UMS console.
//!
//! - [`errors`]: Closed error taxonomy and user-facing failure messages
//! - [`envelope`]: `{success, data, message}` response unwrapping
//! - [`codes`]: Academic unit code derivation and validation
//! - [`permissions`]: Permission naming conventions and categories
//! - [`serde`]: Tolerant collection decoding
//!
//! # Example
//!
//! ```ignore
//! use ums_core::codes::derive_code;
//! use ums_core::errors::{Action, ConsoleError, failure_message};
//!
//! let code = derive_code("Faculty of Engineering", 3)?;
//! let err = ConsoleError::from_status(500, "boom");
//! let shown = failure_message(Action::Create, "faculty", &err);
//! ```

pub mod codes;
pub mod envelope;
pub mod errors;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use codes::{CodeMode, derive_code, is_valid_code};
pub use envelope::{Envelope, decode_payload, unwrap_envelope};
pub use errors::{Action, ConsoleError, ErrorKind, FieldErrors, failure_message};
