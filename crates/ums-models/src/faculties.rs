//! Faculty models and DTOs.

use serde::{Deserialize, Serialize};
use ums_core::codes::CodeMode;
use ums_core::errors::ConsoleError;
use validator::Validate;

use crate::ids::FacultyId;
use crate::validate_unit_code;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    /// `None` until the backend has persisted the faculty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FacultyId>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dean: Option<String>,
    #[serde(default)]
    pub established_year: Option<i32>,
}

impl Faculty {
    /// Local view of a DTO, used for optimistic inserts and edits.
    pub fn from_dto(id: Option<FacultyId>, dto: &FacultyDto) -> Self {
        Self {
            id,
            name: dto.name.clone(),
            code: dto.code.clone(),
            description: dto.description.clone(),
            dean: dto.dean.clone(),
            established_year: dto.established_year,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FacultyDto {
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
    pub dean: Option<String>,
    #[validate(range(min = 1800, max = 2100, message = "Established year is out of range"))]
    pub established_year: Option<i32>,
}

impl FacultyDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fills `code` from the name or the manually entered value.
    pub fn with_code(mut self, mode: &CodeMode) -> Result<Self, ConsoleError> {
        self.code = mode.resolve(&self.name)?;
        Ok(self)
    }
}

impl From<&Faculty> for FacultyDto {
    fn from(faculty: &Faculty) -> Self {
        Self {
            name: faculty.name.clone(),
            code: faculty.code.clone(),
            description: faculty.description.clone(),
            dean: faculty.dean.clone(),
            established_year: faculty.established_year,
        }
    }
}
