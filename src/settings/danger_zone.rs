//! Confirmation-gated tenant deletion.
//!
//! Deleting is only possible once the tenant record is loaded, the typed
//! confirmation equals the tenant name exactly and the irreversibility
//! acknowledgement is checked.

use std::future::Future;

use tracing::{info, warn};
use ums_core::errors::{Action, ConsoleError, failure_message};
use ums_models::ums::UmsIntro;

const ENTITY: &str = "institution";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DangerZoneState {
    Idle,
    Open,
    Armed,
    Deleting,
    /// The tenant is gone.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Open,
    Deleting,
    Closed,
}

#[derive(Debug, Clone)]
pub struct DangerZone {
    tenant_name: Option<String>,
    phase: Phase,
    confirmation: String,
    acknowledged: bool,
    error: Option<String>,
}

impl Default for DangerZone {
    fn default() -> Self {
        Self::new()
    }
}

impl DangerZone {
    pub fn new() -> Self {
        Self {
            tenant_name: None,
            phase: Phase::Idle,
            confirmation: String::new(),
            acknowledged: false,
            error: None,
        }
    }

    /// Tracks the loaded tenant record; `None` while it is loading or absent.
    pub fn set_tenant(&mut self, intro: Option<&UmsIntro>) {
        self.tenant_name = intro.map(|i| i.name.clone());
    }

    pub fn tenant_name(&self) -> Option<&str> {
        self.tenant_name.as_deref()
    }

    pub fn state(&self) -> DangerZoneState {
        match self.phase {
            Phase::Idle => DangerZoneState::Idle,
            Phase::Open if self.is_armed() => DangerZoneState::Armed,
            Phase::Open => DangerZoneState::Open,
            Phase::Deleting => DangerZoneState::Deleting,
            Phase::Closed => DangerZoneState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open | Phase::Deleting)
    }

    pub fn confirmation(&self) -> &str {
        &self.confirmation
    }

    pub fn acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Opens the dialog with a blank confirmation.
    pub fn open(&mut self) {
        if self.phase == Phase::Closed {
            return;
        }
        self.phase = Phase::Open;
        self.confirmation.clear();
        self.acknowledged = false;
        self.error = None;
    }

    pub fn set_confirmation(&mut self, text: impl Into<String>) {
        self.confirmation = text.into();
    }

    pub fn set_acknowledged(&mut self, acknowledged: bool) {
        self.acknowledged = acknowledged;
    }

    /// Case-sensitive, exact comparison; surrounding whitespace counts.
    pub fn is_armed(&self) -> bool {
        self.phase == Phase::Open
            && self.acknowledged
            && self
                .tenant_name
                .as_deref()
                .is_some_and(|name| !name.is_empty() && name == self.confirmation)
    }

    /// Runs `op` when armed. On failure the dialog stays open with an
    /// error and the confirmation inputs untouched.
    pub async fn delete<F, Fut>(&mut self, op: F) -> Result<(), ConsoleError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), ConsoleError>>,
    {
        if !self.is_armed() {
            return Err(ConsoleError::Validation(
                "Type the institution name and acknowledge the warning to continue".into(),
            ));
        }

        self.phase = Phase::Deleting;
        self.error = None;
        match op().await {
            Ok(()) => {
                info!(tenant = ?self.tenant_name, "Institution deleted");
                self.phase = Phase::Closed;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Institution deletion failed");
                self.phase = Phase::Open;
                self.error = Some(failure_message(Action::Delete, ENTITY, &err));
                Err(err)
            }
        }
    }

    /// Closes the dialog without deleting.
    pub fn dismiss(&mut self) {
        if matches!(self.phase, Phase::Open) {
            self.phase = Phase::Idle;
            self.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ums_models::ums::UmsStatus;

    fn acme() -> UmsIntro {
        UmsIntro {
            name: "Acme University".into(),
            ums_type: None,
            module_count: 3,
            teacher_app: true,
            student_app: true,
            status: UmsStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn opened() -> DangerZone {
        let mut zone = DangerZone::new();
        zone.set_tenant(Some(&acme()));
        zone.open();
        zone
    }

    #[test]
    fn test_arming_needs_exact_name_and_ack() {
        let mut zone = opened();
        assert_eq!(zone.state(), DangerZoneState::Open);

        zone.set_confirmation("acme university");
        zone.set_acknowledged(true);
        assert_eq!(zone.state(), DangerZoneState::Open);

        zone.set_confirmation("Acme University");
        assert_eq!(zone.state(), DangerZoneState::Armed);

        zone.set_acknowledged(false);
        assert!(!zone.is_armed());
    }

    #[test]
    fn test_disabled_without_tenant() {
        let mut zone = DangerZone::new();
        zone.open();
        zone.set_confirmation("");
        zone.set_acknowledged(true);
        assert!(!zone.is_armed());

        zone.set_confirmation("Acme University");
        assert!(!zone.is_armed());
    }

    #[test]
    fn test_open_resets_inputs() {
        let mut zone = opened();
        zone.set_confirmation("Acme University");
        zone.set_acknowledged(true);
        zone.dismiss();
        assert_eq!(zone.state(), DangerZoneState::Idle);

        zone.open();
        assert_eq!(zone.confirmation(), "");
        assert!(!zone.acknowledged());
    }

    #[tokio::test]
    async fn test_delete_not_called_unless_armed() {
        let mut zone = opened();
        zone.set_confirmation("Acme University");
        let mut called = false;
        let result = zone
            .delete(|| {
                called = true;
                async { Ok(()) }
            })
            .await;
        assert!(result.is_err());
        assert!(!called);
    }

    #[tokio::test]
    async fn test_failure_stays_armed_then_retry_closes() {
        let mut zone = opened();
        zone.set_confirmation("Acme University");
        zone.set_acknowledged(true);

        let result = zone
            .delete(|| async { Err(ConsoleError::Transport("connection reset".into())) })
            .await;
        assert!(result.is_err());
        assert_eq!(zone.state(), DangerZoneState::Armed);
        assert_eq!(
            zone.error(),
            Some("Failed to delete institution. Please try again.")
        );
        assert_eq!(zone.confirmation(), "Acme University");

        zone.delete(|| async { Ok(()) }).await.unwrap();
        assert_eq!(zone.state(), DangerZoneState::Closed);
        assert_eq!(zone.error(), None);

        zone.open();
        assert_eq!(zone.state(), DangerZoneState::Closed);
    }
}
