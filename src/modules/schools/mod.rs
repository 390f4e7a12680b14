pub mod service;

pub use service::SchoolService;
pub use ums_models::schools::{School, SchoolDto};

use crate::store::ResourceStore;

pub type SchoolStore = ResourceStore<SchoolService>;
