//! # UMS Console
//!
//! Headless core of the tenant-admin console for a multi-tenant University
//! Management System. An institution administrator uses it to configure
//! their tenant against the UMS REST backend:
//!
//! - **Academic units**: faculties, schools and certification programs with
//!   derived unit codes
//! - **Roles & permissions**: role drafts with embedded users, and a
//!   permission assignment drawer over the grouped catalog
//! - **Platforms & modules**: app access flags, desktop offices and the
//!   enabled module set
//! - **Settings**: the tabbed aggregate settings form and tenant deletion
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── ums-core/        # Errors, response envelope, unit codes, permission names
//! ├── ums-config/      # Environment configuration
//! └── ums-models/      # Wire models and DTOs
//! src/
//! ├── api/             # reqwest client with envelope unwrapping
//! ├── store.rs         # Optimistic server-synced collections
//! ├── modules/         # One service (+ store/controller) per resource
//! ├── settings/        # Settings shell and danger zone
//! ├── cli/             # Command handlers for the binary
//! └── mock_server/     # In-memory backend (feature `test-utils`)
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `mod.rs`: exports and the store type alias
//! - `service.rs`: remote calls, one method per endpoint
//! - `controller.rs` / `form.rs`: local editing state, where the console needs it
//!
//! ## Quick Start
//!
//! ```bash
//! UMS_API_URL=https://ums.example.edu/api
//! UMS_API_TOKEN=...
//! ```
//!
//! ```bash
//! cargo run -- intro
//! cargo run -- faculties create "Faculty of Engineering" --code-length 3
//! ```
//!
//! ## Modules
//!
//! - [`api`]: HTTP client
//! - [`store`]: Optimistic resource store
//! - [`modules`]: Feature modules
//! - [`settings`]: Settings shell and tenant deletion
//! - [`logging`]: Tracing subscriber setup
//! - [`state`]: Shared client and configuration

pub mod api;
pub mod cli;
pub mod logging;
#[cfg(feature = "test-utils")]
pub mod mock_server;
pub mod modules;
pub mod settings;
pub mod state;
pub mod store;

// Re-export workspace crates for convenience
pub use ums_config;
pub use ums_core;
pub use ums_models;
