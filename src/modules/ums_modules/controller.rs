//! Enabled-module selection with optimistic save and rollback.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use ums_core::errors::{Action, ConsoleError, failure_message};
use ums_models::modules::{EnabledModules, UmsModule};

use super::service::ModuleService;

const ENTITY: &str = "modules";

pub struct ModulesController {
    service: ModuleService,
    server: Option<EnabledModules>,
    current: Option<EnabledModules>,
    draft: EnabledModules,
    error: Option<String>,
    cancel: CancellationToken,
}

impl ModulesController {
    pub fn new(service: ModuleService) -> Self {
        Self {
            service,
            server: None,
            current: None,
            draft: EnabledModules::default(),
            error: None,
            cancel: CancellationToken::new(),
        }
    }

    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        self.error = None;
        match self.service.get_modules(&self.cancel).await {
            Ok(modules) => {
                self.accept(modules);
                Ok(())
            }
            Err(err) => {
                self.fail(Action::Fetch, &err);
                Err(err)
            }
        }
    }

    pub fn current(&self) -> Option<&EnabledModules> {
        self.current.as_ref()
    }

    pub fn draft(&self) -> &EnabledModules {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_enabled(&self, module: UmsModule) -> bool {
        self.draft.is_enabled(module)
    }

    /// Catalog entries paired with their draft state, in catalog order.
    pub fn catalog(&self) -> Vec<(UmsModule, bool)> {
        UmsModule::CATALOG
            .iter()
            .map(|m| (*m, self.draft.is_enabled(*m)))
            .collect()
    }

    pub fn toggle(&mut self, module: UmsModule) -> bool {
        let enabled = self.draft.toggle(module);
        debug!(module = %module, enabled, "Module toggled");
        enabled
    }

    pub fn is_dirty(&self) -> bool {
        self.server
            .as_ref()
            .is_some_and(|server| server.modules != self.draft.modules)
    }

    pub async fn save(&mut self) -> Result<(), ConsoleError> {
        self.current = Some(self.draft.clone());
        self.error = None;

        match self.service.update_modules(&self.draft, &self.cancel).await {
            Ok(saved) => {
                self.accept(saved);
                match self.service.get_modules(&self.cancel).await {
                    Ok(fresh) => self.accept(fresh),
                    Err(err) => warn!(error = %err, "Re-reading modules failed"),
                }
                Ok(())
            }
            Err(err) => {
                self.current = self.server.clone();
                self.fail(Action::Update, &err);
                Err(err)
            }
        }
    }

    fn accept(&mut self, modules: EnabledModules) {
        self.draft = modules.clone();
        self.current = Some(modules.clone());
        self.server = Some(modules);
    }

    fn fail(&mut self, action: Action, err: &ConsoleError) {
        if matches!(err, ConsoleError::Cancelled) {
            return;
        }
        warn!(action = %action, error = %err, "Modules operation failed");
        self.error = Some(failure_message(action, ENTITY, err));
    }
}

impl Drop for ModulesController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
