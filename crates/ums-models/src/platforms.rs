//! Platform access flags for a tenant.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Back-office functions eligible for desktop-client access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesktopOffice {
    AdmissionOffice,
    ExaminationOffice,
    FinanceOffice,
    RegistrarOffice,
}

impl DesktopOffice {
    pub const ALL: [DesktopOffice; 4] = [
        DesktopOffice::AdmissionOffice,
        DesktopOffice::ExaminationOffice,
        DesktopOffice::FinanceOffice,
        DesktopOffice::RegistrarOffice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DesktopOffice::AdmissionOffice => "Admission Office",
            DesktopOffice::ExaminationOffice => "Examination Office",
            DesktopOffice::FinanceOffice => "Finance Office",
            DesktopOffice::RegistrarOffice => "Registrar Office",
        }
    }
}

impl fmt::Display for DesktopOffice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two mobile apps a tenant can switch on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformApp {
    TeacherApp,
    StudentApp,
}

impl fmt::Display for PlatformApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformApp::TeacherApp => f.write_str("Teacher App"),
            PlatformApp::StudentApp => f.write_str("Student App"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platforms {
    #[serde(default)]
    pub teacher_app: bool,
    #[serde(default)]
    pub student_app: bool,
    #[serde(default)]
    pub desktop_offices: Vec<DesktopOffice>,
}

impl Platforms {
    pub fn app(&self, app: PlatformApp) -> bool {
        match app {
            PlatformApp::TeacherApp => self.teacher_app,
            PlatformApp::StudentApp => self.student_app,
        }
    }

    pub fn set_app(&mut self, app: PlatformApp, enabled: bool) {
        match app {
            PlatformApp::TeacherApp => self.teacher_app = enabled,
            PlatformApp::StudentApp => self.student_app = enabled,
        }
    }

    pub fn has_office(&self, office: DesktopOffice) -> bool {
        self.desktop_offices.contains(&office)
    }

    /// Adds the office if absent, removes it otherwise.
    pub fn toggle_office(&mut self, office: DesktopOffice) {
        if let Some(pos) = self.desktop_offices.iter().position(|o| *o == office) {
            self.desktop_offices.remove(pos);
        } else {
            self.desktop_offices.push(office);
        }
    }

    /// Structural equality ignoring office order and duplicates.
    pub fn same_as(&self, other: &Platforms) -> bool {
        let mine: BTreeSet<_> = self.desktop_offices.iter().collect();
        let theirs: BTreeSet<_> = other.desktop_offices.iter().collect();
        self.teacher_app == other.teacher_app && self.student_app == other.student_app && mine == theirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_same_as_ignores_office_order() {
        let a = Platforms {
            teacher_app: true,
            student_app: false,
            desktop_offices: vec![DesktopOffice::FinanceOffice, DesktopOffice::AdmissionOffice],
        };
        let b = Platforms {
            desktop_offices: vec![DesktopOffice::AdmissionOffice, DesktopOffice::FinanceOffice],
            ..a.clone()
        };
        assert!(a.same_as(&b));
        assert_ne!(a, b);

        let c = Platforms {
            student_app: true,
            ..b.clone()
        };
        assert!(!a.same_as(&c));
    }

    #[test]
    fn test_toggle_office() {
        let mut p = Platforms::default();
        p.toggle_office(DesktopOffice::RegistrarOffice);
        assert!(p.has_office(DesktopOffice::RegistrarOffice));
        p.toggle_office(DesktopOffice::RegistrarOffice);
        assert!(p.desktop_offices.is_empty());
    }

    #[test]
    fn test_wire_format() {
        let p: Platforms = serde_json::from_value(json!({
            "teacherApp": true,
            "desktopOffices": ["examination_office"]
        }))
        .unwrap();
        assert!(p.app(PlatformApp::TeacherApp));
        assert!(!p.app(PlatformApp::StudentApp));
        assert_eq!(p.desktop_offices, vec![DesktopOffice::ExaminationOffice]);

        let unknown = serde_json::from_value::<Platforms>(json!({
            "desktopOffices": ["cafeteria"]
        }));
        assert!(unknown.is_err());
    }
}
