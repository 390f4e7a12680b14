pub mod controller;
pub mod service;

pub use controller::ModulesController;
pub use service::ModuleService;
pub use ums_models::modules::{EnabledModules, UmsModule};
