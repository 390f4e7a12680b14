#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use ums_console::mock_server::{MockBackend, MockData};
use ums_console::state::AppState;
use ums_console::ums_config::{ApiConfig, ConsoleConfig};
use ums_console::ums_models::faculties::{Faculty, FacultyDto};
use ums_console::ums_models::ids::{FacultyId, PermissionId, RoleId};
use ums_console::ums_models::modules::{EnabledModules, UmsModule};
use ums_console::ums_models::platforms::{DesktopOffice, Platforms};
use ums_console::ums_models::roles::{Permission, Role, RoleUser};
use ums_console::ums_models::ums::{GeneralSettings, UmsIntro, UmsSettings, UmsStatus};

pub const TENANT_NAME: &str = "Acme University";

/// Well-known permission IDs seeded into every backend
pub mod permission_ids {
    use super::PermissionId;
    pub const USER_CREATE: PermissionId = PermissionId::from_u128(0x101);
    pub const USER_READ: PermissionId = PermissionId::from_u128(0x102);
    pub const USER_DELETE: PermissionId = PermissionId::from_u128(0x103);
    pub const ROLE_MANAGE: PermissionId = PermissionId::from_u128(0x201);
    pub const FACULTY_CREATE: PermissionId = PermissionId::from_u128(0x301);
    pub const FACULTY_READ: PermissionId = PermissionId::from_u128(0x302);
}

pub const REGISTRAR_ID: RoleId = RoleId::from_u128(0x900);

fn permission(id: PermissionId, name: &str, code: &str) -> Permission {
    Permission {
        id,
        name: name.to_string(),
        code: Some(code.to_string()),
        description: None,
        category: None,
    }
}

pub fn seeded_permissions() -> Vec<Permission> {
    use permission_ids::*;
    vec![
        permission(USER_CREATE, "USER_CREATE", "users.create"),
        permission(USER_READ, "USER_READ", "users.read"),
        permission(USER_DELETE, "USER_DELETE", "users.delete"),
        permission(ROLE_MANAGE, "ROLE_MANAGE", "roles.manage"),
        permission(FACULTY_CREATE, "FACULTY_CREATE", "faculties.create"),
        permission(FACULTY_READ, "FACULTY_READ", "faculties.read"),
    ]
}

pub fn intro() -> UmsIntro {
    UmsIntro {
        name: TENANT_NAME.to_string(),
        ums_type: Some("university".to_string()),
        module_count: 2,
        teacher_app: true,
        student_app: false,
        status: UmsStatus::Active,
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
    }
}

pub fn faculty(name: &str, code: &str) -> Faculty {
    let dto = FacultyDto {
        code: code.to_string(),
        dean: Some(Name().fake()),
        ..FacultyDto::new(name)
    };
    Faculty::from_dto(Some(FacultyId::new()), &dto)
}

pub fn role_user(is_primary: bool) -> RoleUser {
    RoleUser {
        email: SafeEmail().fake(),
        password: None,
        is_primary,
    }
}

/// A live tenant with a faculty, a role and the permission catalog.
pub fn seed() -> MockData {
    let platforms = Platforms {
        teacher_app: true,
        student_app: false,
        desktop_offices: vec![DesktopOffice::FinanceOffice],
    };
    let modules = [UmsModule::Admissions, UmsModule::Academics];

    MockData {
        intro: Some(intro()),
        settings: UmsSettings {
            general: GeneralSettings {
                name: TENANT_NAME.to_string(),
                short_name: Some("ACME".to_string()),
                email: Some("registrar@acme.edu".to_string()),
                ..Default::default()
            },
            modules: modules.to_vec(),
            platforms: platforms.clone(),
        },
        modules: EnabledModules {
            modules: modules.into_iter().collect(),
        },
        platforms,
        faculties: vec![faculty("Faculty of Science", "SCI")],
        schools: Vec::new(),
        programs: Vec::new(),
        roles: vec![Role {
            id: Some(REGISTRAR_ID),
            name: "Registrar".to_string(),
            description: Some("Student records".to_string()),
            permissions: vec![permission_ids::USER_READ],
            users: vec![role_user(true)],
        }],
        permissions: seeded_permissions(),
    }
}

/// Starts a mock backend with `data` and an app state pointed at it.
pub async fn spawn(data: MockData) -> (MockBackend, AppState) {
    let backend = MockBackend::start(data).await.unwrap();
    let api = ApiConfig::default().with_base_url(backend.base_url());
    let state = AppState::new(api, ConsoleConfig::default()).unwrap();
    (backend, state)
}
