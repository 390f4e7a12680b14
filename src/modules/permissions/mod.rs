pub mod drawer;
pub mod filter;
pub mod service;

pub use drawer::PermissionsDrawer;
pub use filter::{PermissionFilter, PermissionSelection};
pub use service::PermissionService;
pub use ums_models::roles::{Permission, PermissionGroup};
