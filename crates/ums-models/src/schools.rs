//! School models and DTOs.
//!
//! A school may sit under a faculty; `facultyId` is optional.

use serde::{Deserialize, Serialize};
use ums_core::codes::CodeMode;
use ums_core::errors::ConsoleError;
use validator::Validate;

use crate::ids::{FacultyId, SchoolId};
use crate::validate_unit_code;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SchoolId>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub established_year: Option<i32>,
    #[serde(default)]
    pub faculty_id: Option<FacultyId>,
}

impl School {
    pub fn from_dto(id: Option<SchoolId>, dto: &SchoolDto) -> Self {
        Self {
            id,
            name: dto.name.clone(),
            code: dto.code.clone(),
            description: dto.description.clone(),
            director: dto.director.clone(),
            established_year: dto.established_year,
            faculty_id: dto.faculty_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(custom(function = "validate_unit_code"))]
    pub code: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
    pub director: Option<String>,
    #[validate(range(min = 1800, max = 2100, message = "Established year is out of range"))]
    pub established_year: Option<i32>,
    pub faculty_id: Option<FacultyId>,
}

impl SchoolDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_code(mut self, mode: &CodeMode) -> Result<Self, ConsoleError> {
        self.code = mode.resolve(&self.name)?;
        Ok(self)
    }
}

impl From<&School> for SchoolDto {
    fn from(school: &School) -> Self {
        Self {
            name: school.name.clone(),
            code: school.code.clone(),
            description: school.description.clone(),
            director: school.director.clone(),
            established_year: school.established_year,
            faculty_id: school.faculty_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_dto_code_modes() {
        let auto = SchoolDto::new("School of Computer Science")
            .with_code(&CodeMode::Auto(3))
            .unwrap();
        assert_eq!(auto.code, "CSC");
        assert!(auto.validate().is_ok());

        let manual = SchoolDto::new("School of Computer Science")
            .with_code(&CodeMode::Manual("SCS".into()))
            .unwrap();
        assert_eq!(manual.code, "SCS");
    }

    #[test]
    fn test_school_keeps_parent_faculty() {
        let faculty = FacultyId::new();
        let dto = SchoolDto {
            faculty_id: Some(faculty),
            ..SchoolDto::new("School of Medicine")
        };
        let school = School::from_dto(None, &dto);
        assert_eq!(school.faculty_id, Some(faculty));
        assert_eq!(SchoolDto::from(&school), dto);
    }
}
