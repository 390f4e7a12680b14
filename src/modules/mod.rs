//! Feature modules. Each wraps one backend resource in a service and, where
//! the console edits it, a store or controller holding the local state.

pub mod certification_programs;
pub mod faculties;
pub mod permissions;
pub mod platforms;
pub mod roles;
pub mod schools;
pub mod ums;
pub mod ums_modules;

pub use self::faculties::Faculty;
pub use self::roles::Role;
