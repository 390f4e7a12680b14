//! Certification program models and DTOs.

use serde::{Deserialize, Serialize};
use ums_core::codes::CodeMode;
use ums_core::errors::ConsoleError;
use validator::Validate;

use crate::ids::{DepartmentId, FacultyId, ProgramId, SchoolId};
use crate::validate_unit_code;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationLevel {
    #[default]
    Certificate,
    Diploma,
    AdvancedDiploma,
    Professional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationProgram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProgramId>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: CertificationLevel,
    #[serde(default)]
    pub duration_months: Option<u32>,
    #[serde(default)]
    pub credits: Option<u32>,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub faculty_id: Option<FacultyId>,
    #[serde(default)]
    pub school_id: Option<SchoolId>,
}

impl CertificationProgram {
    pub fn from_dto(id: Option<ProgramId>, dto: &CertificationProgramDto) -> Self {
        Self {
            id,
            name: dto.name.clone(),
            code: dto.code.clone(),
            description: dto.description.clone(),
            level: dto.level,
            duration_months: dto.duration_months,
            credits: dto.credits,
            department_id: dto.department_id,
            faculty_id: dto.faculty_id,
            school_id: dto.school_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CertificationProgramDto {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Name must be between 1 and 150 characters"
    ))]
    pub name: String,
    #[validate(custom(function = "validate_unit_code"))]
    pub code: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
    pub level: CertificationLevel,
    #[validate(range(min = 1, max = 120, message = "Duration must be between 1 and 120 months"))]
    pub duration_months: Option<u32>,
    #[validate(range(max = 400, message = "Credits must not exceed 400"))]
    pub credits: Option<u32>,
    pub department_id: Option<DepartmentId>,
    pub faculty_id: Option<FacultyId>,
    pub school_id: Option<SchoolId>,
}

impl CertificationProgramDto {
    pub fn new(name: impl Into<String>, level: CertificationLevel) -> Self {
        Self {
            name: name.into(),
            level,
            ..Default::default()
        }
    }

    pub fn with_code(mut self, mode: &CodeMode) -> Result<Self, ConsoleError> {
        self.code = mode.resolve(&self.name)?;
        Ok(self)
    }
}

impl From<&CertificationProgram> for CertificationProgramDto {
    fn from(program: &CertificationProgram) -> Self {
        Self {
            name: program.name.clone(),
            code: program.code.clone(),
            description: program.description.clone(),
            level: program.level,
            duration_months: program.duration_months,
            credits: program.credits,
            department_id: program.department_id,
            faculty_id: program.faculty_id,
            school_id: program.school_id,
        }
    }
}
