pub mod controller;
pub mod service;

pub use controller::{PlatformController, ToggleOutcome};
pub use service::PlatformService;
pub use ums_models::platforms::{DesktopOffice, PlatformApp, Platforms};
