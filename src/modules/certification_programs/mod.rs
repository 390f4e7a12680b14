pub mod service;

pub use service::CertificationProgramService;
pub use ums_models::certification_programs::{
    CertificationLevel, CertificationProgram, CertificationProgramDto,
};

use crate::store::ResourceStore;

pub type CertificationProgramStore = ResourceStore<CertificationProgramService>;
