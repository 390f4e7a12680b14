//! Tenant-level records: the intro summary and the aggregate settings form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::UmsModule;
use crate::platforms::Platforms;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UmsStatus {
    Active,
    #[default]
    Pending,
    Suspended,
}

impl fmt::Display for UmsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UmsStatus::Active => f.write_str("active"),
            UmsStatus::Pending => f.write_str("pending"),
            UmsStatus::Suspended => f.write_str("suspended"),
        }
    }
}

/// Read-mostly summary of the tenant used by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmsIntro {
    pub name: String,
    #[serde(default)]
    pub ums_type: Option<String>,
    #[serde(default)]
    pub module_count: u32,
    #[serde(default)]
    pub teacher_app: bool,
    #[serde(default)]
    pub student_app: bool,
    #[serde(default)]
    pub status: UmsStatus,
    pub created_at: DateTime<Utc>,
}

impl UmsIntro {
    /// Tenant-scoped configuration is only offered for a live tenant.
    pub fn allows_configuration(&self) -> bool {
        matches!(self.status, UmsStatus::Active | UmsStatus::Pending)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Institution name must be between 1 and 150 characters"
    ))]
    pub name: String,
    #[validate(length(max = 20, message = "Short name must not exceed 20 characters"))]
    #[serde(default)]
    pub short_name: Option<String>,
    #[validate(email(message = "Please enter a valid email address"))]
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[validate(url(message = "Website must be a valid URL"))]
    #[serde(default)]
    pub website: Option<String>,
}

/// The aggregate form edited through the settings tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UmsSettings {
    #[validate(nested)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub modules: Vec<UmsModule>,
    #[serde(default)]
    pub platforms: Platforms,
}

impl UmsSettings {
    /// Equality that ignores module and office ordering.
    pub fn same_as(&self, other: &UmsSettings) -> bool {
        let mut mine = self.modules.clone();
        let mut theirs = other.modules.clone();
        mine.sort();
        mine.dedup();
        theirs.sort();
        theirs.dedup();
        self.general == other.general && mine == theirs && self.platforms.same_as(&other.platforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_intro_wire_format() {
        let intro: UmsIntro = serde_json::from_value(json!({
            "name": "Acme University",
            "umsType": "university",
            "moduleCount": 4,
            "teacherApp": true,
            "studentApp": false,
            "status": "active",
            "createdAt": "2024-01-15T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(intro.module_count, 4);
        assert!(intro.allows_configuration());
    }

    #[test]
    fn test_suspended_tenant_is_locked() {
        let intro = UmsIntro {
            name: "Acme".into(),
            ums_type: None,
            module_count: 0,
            teacher_app: false,
            student_app: false,
            status: UmsStatus::Suspended,
            created_at: Utc::now(),
        };
        assert!(!intro.allows_configuration());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = UmsSettings {
            general: GeneralSettings {
                name: "Acme University".into(),
                email: Some("admin@acme.edu".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.validate().is_ok());

        settings.general.email = Some("not-an-email".into());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_same_as_ignores_module_order() {
        let a = UmsSettings {
            modules: vec![UmsModule::Finance, UmsModule::Library],
            ..Default::default()
        };
        let b = UmsSettings {
            modules: vec![UmsModule::Library, UmsModule::Finance],
            ..Default::default()
        };
        assert!(a.same_as(&b));
    }
}
