//! Tabbed settings surface over the aggregate tenant settings form.
//!
//! Panels never touch the form directly; they go through
//! [`SettingsShell::update`], which keeps the single unsaved-changes flag in
//! step with the last saved snapshot.

use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use ums_core::errors::{Action, ConsoleError, failure_message};
use ums_models::ums::{UmsIntro, UmsSettings};

use super::danger_zone::DangerZone;
use crate::modules::ums::UmsService;

const ENTITY: &str = "settings";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SettingsTab {
    #[default]
    General,
    Modules,
    Platforms,
    Roles,
    DangerZone,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 5] = [
        SettingsTab::General,
        SettingsTab::Modules,
        SettingsTab::Platforms,
        SettingsTab::Roles,
        SettingsTab::DangerZone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsTab::General => "General",
            SettingsTab::Modules => "Modules",
            SettingsTab::Platforms => "Platforms",
            SettingsTab::Roles => "Roles & Permissions",
            SettingsTab::DangerZone => "Danger Zone",
        }
    }

    /// Tabs editing the aggregate form; the rest manage their own records.
    pub fn edits_form(self) -> bool {
        matches!(
            self,
            SettingsTab::General | SettingsTab::Modules | SettingsTab::Platforms
        )
    }
}

impl fmt::Display for SettingsTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct SettingsShell {
    service: UmsService,
    intro: Option<UmsIntro>,
    form: UmsSettings,
    snapshot: Option<UmsSettings>,
    unsaved: bool,
    tab: SettingsTab,
    loading: bool,
    saving: bool,
    error: Option<String>,
    danger_zone: DangerZone,
    cancel: CancellationToken,
}

impl SettingsShell {
    pub fn new(service: UmsService) -> Self {
        Self {
            service,
            intro: None,
            form: UmsSettings::default(),
            snapshot: None,
            unsaved: false,
            tab: SettingsTab::default(),
            loading: false,
            saving: false,
            error: None,
            danger_zone: DangerZone::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Fetches the tenant summary and the aggregate settings.
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        self.loading = true;
        self.error = None;
        let result = self.fetch().await;
        self.loading = false;
        if let Err(err) = &result
            && !matches!(err, ConsoleError::Cancelled)
        {
            warn!(error = %err, "Loading settings failed");
            self.error = Some(failure_message(Action::Fetch, ENTITY, err));
        }
        result
    }

    async fn fetch(&mut self) -> Result<(), ConsoleError> {
        let intro = self.service.get_intro(&self.cancel).await?;
        self.danger_zone.set_tenant(Some(&intro));
        self.intro = Some(intro);

        let settings = self.service.get_settings(&self.cancel).await?;
        debug!(modules = settings.modules.len(), "Settings loaded");
        self.snapshot = Some(settings.clone());
        self.form = settings;
        self.unsaved = false;
        Ok(())
    }

    pub fn intro(&self) -> Option<&UmsIntro> {
        self.intro.as_ref()
    }

    /// Whether tenant-scoped actions are offered.
    pub fn can_configure(&self) -> bool {
        self.intro
            .as_ref()
            .is_some_and(UmsIntro::allows_configuration)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn tab(&self) -> SettingsTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: SettingsTab) {
        self.tab = tab;
    }

    pub fn form(&self) -> &UmsSettings {
        &self.form
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Applies a panel's change to the form.
    pub fn update<F>(&mut self, change: F)
    where
        F: FnOnce(&mut UmsSettings),
    {
        change(&mut self.form);
        self.unsaved = match &self.snapshot {
            Some(snapshot) => !self.form.same_as(snapshot),
            None => self.form != UmsSettings::default(),
        };
    }

    /// Restores the last saved snapshot.
    pub fn discard(&mut self) {
        self.form = self.snapshot.clone().unwrap_or_default();
        self.unsaved = false;
        self.error = None;
    }

    /// Persists the whole form. On failure the edits and the unsaved flag
    /// are kept so the user can retry.
    pub async fn save(&mut self) -> Result<(), ConsoleError> {
        if !self.can_configure() {
            return Err(ConsoleError::Validation(
                "Institution details are not available".into(),
            ));
        }

        self.saving = true;
        self.error = None;
        let result = self.service.update_settings(&self.form, &self.cancel).await;
        self.saving = false;

        match result {
            Ok(saved) => {
                info!("Settings saved");
                self.snapshot = Some(saved.clone());
                self.form = saved;
                self.unsaved = false;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Saving settings failed");
                self.error = Some(failure_message(Action::Save, ENTITY, &err));
                Err(err)
            }
        }
    }

    pub fn danger_zone(&self) -> &DangerZone {
        &self.danger_zone
    }

    pub fn danger_zone_mut(&mut self) -> &mut DangerZone {
        &mut self.danger_zone
    }

    /// Deletes the tenant through the armed danger zone.
    pub async fn delete_tenant(&mut self) -> Result<(), ConsoleError> {
        let service = self.service.clone();
        let cancel = self.cancel.clone();
        self.danger_zone
            .delete(|| async move { service.delete_ums(&cancel).await })
            .await?;

        self.intro = None;
        self.snapshot = None;
        self.form = UmsSettings::default();
        self.unsaved = false;
        self.danger_zone.set_tenant(None);
        Ok(())
    }
}

impl Drop for SettingsShell {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
