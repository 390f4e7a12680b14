use ums_config::{ApiConfig, ConsoleConfig};
use ums_core::errors::ConsoleError;

use crate::api::ApiClient;
use crate::modules::certification_programs::{CertificationProgramService, CertificationProgramStore};
use crate::modules::faculties::{FacultyService, FacultyStore};
use crate::modules::permissions::{PermissionService, PermissionsDrawer};
use crate::modules::platforms::{PlatformController, PlatformService};
use crate::modules::roles::{RoleRules, RoleService, RoleStore};
use crate::modules::schools::{SchoolService, SchoolStore};
use crate::modules::ums::UmsService;
use crate::modules::ums_modules::{ModuleService, ModulesController};
use crate::settings::SettingsShell;

/// Shared client and configuration from which stores and controllers are built.
#[derive(Clone, Debug)]
pub struct AppState {
    pub client: ApiClient,
    pub api_config: ApiConfig,
    pub console_config: ConsoleConfig,
}

impl AppState {
    pub fn new(api_config: ApiConfig, console_config: ConsoleConfig) -> Result<Self, ConsoleError> {
        Ok(Self {
            client: ApiClient::new(&api_config)?,
            api_config,
            console_config,
        })
    }

    pub fn faculties(&self) -> FacultyStore {
        FacultyStore::new(
            FacultyService::new(self.client.clone()),
            self.console_config.error_dismiss_after(),
        )
    }

    pub fn schools(&self) -> SchoolStore {
        SchoolStore::new(
            SchoolService::new(self.client.clone()),
            self.console_config.error_dismiss_after(),
        )
    }

    pub fn certification_programs(&self) -> CertificationProgramStore {
        CertificationProgramStore::new(
            CertificationProgramService::new(self.client.clone()),
            self.console_config.error_dismiss_after(),
        )
    }

    pub fn roles(&self) -> RoleStore {
        RoleStore::new(
            RoleService::new(self.client.clone()),
            self.console_config.error_dismiss_after(),
        )
    }

    pub fn role_rules(&self) -> RoleRules {
        RoleRules::from(&self.console_config)
    }

    pub fn permission_service(&self) -> PermissionService {
        PermissionService::new(self.client.clone())
    }

    pub fn permissions_drawer(&self) -> PermissionsDrawer {
        PermissionsDrawer::new(self.permission_service())
    }

    pub fn platforms(&self) -> PlatformController {
        PlatformController::new(PlatformService::new(self.client.clone()))
    }

    pub fn modules(&self) -> ModulesController {
        ModulesController::new(ModuleService::new(self.client.clone()))
    }

    pub fn ums(&self) -> UmsService {
        UmsService::new(self.client.clone())
    }

    pub fn settings(&self) -> SettingsShell {
        SettingsShell::new(self.ums())
    }
}

/// Reads both configuration layers from the environment.
pub fn init_app_state() -> Result<AppState, ConsoleError> {
    AppState::new(ApiConfig::from_env(), ConsoleConfig::from_env())
}
