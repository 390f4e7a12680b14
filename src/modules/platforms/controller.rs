//! Editable platform settings.
//!
//! The controller keeps three copies of the record: the last one read from
//! the backend, the one currently displayed (which a save replaces
//! optimistically) and the draft being edited. Turning an app off is a
//! two-step action that needs an explicit confirmation.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use ums_core::errors::{Action, ConsoleError, failure_message};
use ums_models::platforms::{DesktopOffice, PlatformApp, Platforms};

use super::service::PlatformService;

const ENTITY: &str = "platform settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied,
    /// Disabling waits for [`PlatformController::confirm_pending`].
    NeedsConfirmation,
}

pub struct PlatformController {
    service: PlatformService,
    server: Option<Platforms>,
    current: Option<Platforms>,
    draft: Platforms,
    pending_disable: Option<PlatformApp>,
    loading: bool,
    error: Option<String>,
    cancel: CancellationToken,
}

impl PlatformController {
    pub fn new(service: PlatformService) -> Self {
        Self {
            service,
            server: None,
            current: None,
            draft: Platforms::default(),
            pending_disable: None,
            loading: false,
            error: None,
            cancel: CancellationToken::new(),
        }
    }

    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        self.loading = true;
        self.error = None;
        let result = self.service.get_platforms(&self.cancel).await;
        self.loading = false;
        match result {
            Ok(platforms) => {
                self.accept(platforms);
                Ok(())
            }
            Err(err) => {
                self.fail(Action::Fetch, &err);
                Err(err)
            }
        }
    }

    /// Last record read from the backend.
    pub fn server(&self) -> Option<&Platforms> {
        self.server.as_ref()
    }

    /// Record shown as saved, including an optimistic save in progress.
    pub fn current(&self) -> Option<&Platforms> {
        self.current.as_ref()
    }

    pub fn draft(&self) -> &Platforms {
        &self.draft
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_disable(&self) -> Option<PlatformApp> {
        self.pending_disable
    }

    pub fn is_dirty(&self) -> bool {
        match &self.server {
            Some(server) => !self.draft.same_as(server),
            None => false,
        }
    }

    /// Enabling applies at once; disabling asks for confirmation first.
    pub fn request_toggle(&mut self, app: PlatformApp) -> ToggleOutcome {
        if self.draft.app(app) {
            self.pending_disable = Some(app);
            ToggleOutcome::NeedsConfirmation
        } else {
            self.draft.set_app(app, true);
            ToggleOutcome::Applied
        }
    }

    /// Applies the pending disable, returning the app that was switched off.
    pub fn confirm_pending(&mut self) -> Option<PlatformApp> {
        let app = self.pending_disable.take()?;
        self.draft.set_app(app, false);
        Some(app)
    }

    pub fn cancel_pending(&mut self) {
        self.pending_disable = None;
    }

    pub fn toggle_office(&mut self, office: DesktopOffice) {
        self.draft.toggle_office(office);
    }

    /// Discards local edits.
    pub fn reset(&mut self) {
        if let Some(server) = &self.server {
            self.draft = server.clone();
        }
        self.pending_disable = None;
    }

    /// Persists the draft.
    ///
    /// The draft is shown as current immediately. On failure the displayed
    /// record rolls back to the last server copy while the draft is kept so
    /// the user can retry. On success the record is read again.
    pub async fn save(&mut self) -> Result<(), ConsoleError> {
        self.current = Some(self.draft.clone());
        self.loading = true;
        self.error = None;

        let result = self
            .service
            .update_platforms(&self.draft, &self.cancel)
            .await;
        match result {
            Ok(saved) => {
                info!(
                    teacher_app = saved.teacher_app,
                    student_app = saved.student_app,
                    offices = saved.desktop_offices.len(),
                    "Platform settings saved"
                );
                self.accept(saved);
                match self.service.get_platforms(&self.cancel).await {
                    Ok(fresh) => self.accept(fresh),
                    Err(err) => warn!(error = %err, "Re-reading platform settings failed"),
                }
                self.loading = false;
                Ok(())
            }
            Err(err) => {
                self.loading = false;
                self.current = self.server.clone();
                self.fail(Action::Update, &err);
                Err(err)
            }
        }
    }

    fn accept(&mut self, platforms: Platforms) {
        self.draft = platforms.clone();
        self.current = Some(platforms.clone());
        self.server = Some(platforms);
    }

    fn fail(&mut self, action: Action, err: &ConsoleError) {
        if matches!(err, ConsoleError::Cancelled) {
            return;
        }
        warn!(action = %action, error = %err, "Platform settings operation failed");
        self.error = Some(failure_message(action, ENTITY, err));
    }
}

impl Drop for PlatformController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
