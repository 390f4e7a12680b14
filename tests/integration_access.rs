mod common;

use common::{seed, spawn};
use ums_console::modules::platforms::ToggleOutcome;
use ums_console::ums_models::modules::UmsModule;
use ums_console::ums_models::platforms::{DesktopOffice, PlatformApp};

#[tokio::test]
async fn test_disabling_app_needs_confirmation() {
    let (_backend, state) = spawn(seed()).await;
    let mut platforms = state.platforms();
    platforms.load().await.unwrap();
    assert!(!platforms.is_dirty());

    let outcome = platforms.request_toggle(PlatformApp::TeacherApp);
    assert_eq!(outcome, ToggleOutcome::NeedsConfirmation);
    assert!(platforms.draft().teacher_app);
    assert_eq!(platforms.pending_disable(), Some(PlatformApp::TeacherApp));

    platforms.cancel_pending();
    assert!(platforms.draft().teacher_app);
    assert!(!platforms.is_dirty());

    platforms.request_toggle(PlatformApp::TeacherApp);
    assert_eq!(platforms.confirm_pending(), Some(PlatformApp::TeacherApp));
    assert!(!platforms.draft().teacher_app);
    assert!(platforms.is_dirty());

    let outcome = platforms.request_toggle(PlatformApp::StudentApp);
    assert_eq!(outcome, ToggleOutcome::Applied);
    assert!(platforms.draft().student_app);
}

#[tokio::test]
async fn test_save_persists_and_rereads() {
    let (backend, state) = spawn(seed()).await;
    let mut platforms = state.platforms();
    platforms.load().await.unwrap();

    platforms.request_toggle(PlatformApp::StudentApp);
    platforms.toggle_office(DesktopOffice::FinanceOffice);
    platforms.save().await.unwrap();

    assert_eq!(backend.hits("PUT", "/ums/platforms"), 1);
    assert_eq!(backend.hits("GET", "/ums/platforms"), 2);
    assert!(!platforms.is_dirty());
    assert_eq!(platforms.error(), None);

    let stored = backend.data();
    assert!(stored.platforms.student_app);
    assert!(stored.platforms.desktop_offices.is_empty());
    assert!(stored.intro.unwrap().student_app);

    // Saving an unchanged record is harmless.
    let before = platforms.current().cloned();
    platforms.save().await.unwrap();
    assert_eq!(platforms.current().cloned(), before);
    assert_eq!(backend.hits("PUT", "/ums/platforms"), 2);
    assert!(!platforms.is_dirty());
}

#[tokio::test]
async fn test_failed_save_rolls_back_and_keeps_draft() {
    let (backend, state) = spawn(seed()).await;
    let mut platforms = state.platforms();
    platforms.load().await.unwrap();
    let server = platforms.server().cloned();

    platforms.request_toggle(PlatformApp::StudentApp);
    backend.fail_next("PUT", "/ums/platforms");
    let err = platforms.save().await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(platforms.current().cloned(), server);
    assert!(platforms.draft().student_app);
    assert!(platforms.is_dirty());
    assert_eq!(
        platforms.error(),
        Some("Failed to update platform settings. Please try again.")
    );
    assert!(!backend.data().platforms.student_app);

    platforms.save().await.unwrap();
    assert!(backend.data().platforms.student_app);
    assert_eq!(platforms.error(), None);
}

#[tokio::test]
async fn test_reset_discards_edits() {
    let (_backend, state) = spawn(seed()).await;
    let mut platforms = state.platforms();
    platforms.load().await.unwrap();

    platforms.toggle_office(DesktopOffice::RegistrarOffice);
    platforms.request_toggle(PlatformApp::TeacherApp);
    platforms.reset();

    assert!(!platforms.is_dirty());
    assert_eq!(platforms.pending_disable(), None);
}

#[tokio::test]
async fn test_module_toggles_are_saved() {
    let (backend, state) = spawn(seed()).await;
    let mut modules = state.modules();
    modules.load().await.unwrap();

    assert!(modules.is_enabled(UmsModule::Admissions));
    assert!(!modules.is_enabled(UmsModule::Library));
    let catalog = modules.catalog();
    assert_eq!(catalog.len(), UmsModule::CATALOG.len());
    assert_eq!(catalog[0], (UmsModule::Admissions, true));

    assert!(modules.toggle(UmsModule::Library));
    assert!(!modules.toggle(UmsModule::Academics));
    assert!(modules.is_dirty());

    modules.save().await.unwrap();
    assert!(!modules.is_dirty());
    assert_eq!(backend.hits("PUT", "/ums/modules"), 1);

    let stored = backend.data();
    assert!(stored.modules.is_enabled(UmsModule::Library));
    assert!(!stored.modules.is_enabled(UmsModule::Academics));
    assert_eq!(stored.intro.unwrap().module_count, 2);
}

#[tokio::test]
async fn test_module_save_failure_rolls_back() {
    let (backend, state) = spawn(seed()).await;
    let mut modules = state.modules();
    modules.load().await.unwrap();
    let before = modules.current().cloned();

    modules.toggle(UmsModule::Hostel);
    backend.fail_next("PUT", "/ums/modules");
    modules.save().await.unwrap_err();

    assert_eq!(modules.current().cloned(), before);
    assert!(modules.is_enabled(UmsModule::Hostel));
    assert!(modules.is_dirty());
    assert_eq!(
        modules.error(),
        Some("Failed to update modules. Please try again.")
    );
}
