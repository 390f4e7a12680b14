//! # UMS Models
//!
//! Domain models and DTOs for the UMS console, as they travel over the wire
//! (camelCase JSON) and sit in console state.
//!
//! # Modules
//!
//! - [`faculties`], [`schools`], [`certification_programs`]: Academic units
//! - [`roles`]: Roles, permissions and role users
//! - [`platforms`]: Mobile app flags and desktop offices
//! - [`modules`]: The module catalog and enabled set
//! - [`ums`]: Tenant intro summary and aggregate settings
//! - [`ids`]: Typed identifiers

pub mod certification_programs;
pub mod faculties;
pub mod ids;
pub mod modules;
pub mod platforms;
pub mod roles;
pub mod schools;
pub mod ums;

use std::borrow::Cow;

use validator::ValidationError;

pub use certification_programs::{CertificationLevel, CertificationProgram, CertificationProgramDto};
pub use faculties::{Faculty, FacultyDto};
pub use ids::{DepartmentId, FacultyId, PermissionId, ProgramId, RoleId, SchoolId};
pub use modules::{EnabledModules, UmsModule};
pub use platforms::{DesktopOffice, PlatformApp, Platforms};
pub use roles::{AssignPermissionsDto, Permission, PermissionGroup, Role, RoleUser, group_permissions};
pub use schools::{School, SchoolDto};
pub use ums::{GeneralSettings, UmsIntro, UmsSettings, UmsStatus};

/// `validator` hook for academic unit codes.
pub(crate) fn validate_unit_code(code: &str) -> Result<(), ValidationError> {
    if ums_core::is_valid_code(code) {
        Ok(())
    } else {
        let mut error = ValidationError::new("unit_code");
        error.message = Some(Cow::Borrowed("Code must be 2 to 4 uppercase letters"));
        Err(error)
    }
}
