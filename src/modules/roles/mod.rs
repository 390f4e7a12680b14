pub mod form;
pub mod service;
pub mod user_form;
pub mod validation;

pub use form::{CloseOutcome, FormMode, RoleForm};
pub use service::RoleService;
pub use user_form::{UserForm, UserFormMode};
pub use ums_models::roles::{Role, RoleUser};
pub use validation::RoleRules;

use crate::store::ResourceStore;

pub type RoleStore = ResourceStore<RoleService>;
