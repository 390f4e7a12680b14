pub mod service;

pub use service::FacultyService;
pub use ums_models::faculties::{Faculty, FacultyDto};

use crate::store::ResourceStore;

pub type FacultyStore = ResourceStore<FacultyService>;
