pub mod service;

pub use service::UmsService;
pub use ums_models::ums::{GeneralSettings, UmsIntro, UmsSettings, UmsStatus};
