//! The fixed catalog of UMS modules a tenant can enable.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UmsModule {
    Admissions,
    Academics,
    Examinations,
    Finance,
    Library,
    Hostel,
    Transport,
    HumanResources,
    Attendance,
    Timetable,
}

impl UmsModule {
    pub const CATALOG: [UmsModule; 10] = [
        UmsModule::Admissions,
        UmsModule::Academics,
        UmsModule::Examinations,
        UmsModule::Finance,
        UmsModule::Library,
        UmsModule::Hostel,
        UmsModule::Transport,
        UmsModule::HumanResources,
        UmsModule::Attendance,
        UmsModule::Timetable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UmsModule::Admissions => "Admissions",
            UmsModule::Academics => "Academics",
            UmsModule::Examinations => "Examinations",
            UmsModule::Finance => "Finance",
            UmsModule::Library => "Library",
            UmsModule::Hostel => "Hostel",
            UmsModule::Transport => "Transport",
            UmsModule::HumanResources => "Human Resources",
            UmsModule::Attendance => "Attendance",
            UmsModule::Timetable => "Timetable",
        }
    }
}

impl fmt::Display for UmsModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The enabled-module record served by `/ums/modules`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledModules {
    #[serde(default)]
    pub modules: BTreeSet<UmsModule>,
}

impl EnabledModules {
    pub fn is_enabled(&self, module: UmsModule) -> bool {
        self.modules.contains(&module)
    }

    /// Returns the new enabled state.
    pub fn toggle(&mut self, module: UmsModule) -> bool {
        if self.modules.remove(&module) {
            false
        } else {
            self.modules.insert(module);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toggle() {
        let mut enabled = EnabledModules::default();
        assert!(enabled.toggle(UmsModule::Library));
        assert!(enabled.is_enabled(UmsModule::Library));
        assert!(!enabled.toggle(UmsModule::Library));
        assert!(enabled.modules.is_empty());
    }

    #[test]
    fn test_wire_format() {
        let enabled: EnabledModules =
            serde_json::from_value(json!({"modules": ["human_resources", "finance"]})).unwrap();
        assert!(enabled.is_enabled(UmsModule::HumanResources));
        assert_eq!(enabled.modules.len(), 2);
    }
}
