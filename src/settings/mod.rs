//! The tenant settings surface: tabs, the aggregate form and tenant deletion.

pub mod danger_zone;
pub mod shell;

pub use danger_zone::{DangerZone, DangerZoneState};
pub use shell::{SettingsShell, SettingsTab};
