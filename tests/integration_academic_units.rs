mod common;

use common::{faculty, seed, spawn};
use tokio_util::sync::CancellationToken;
use ums_console::ums_core::codes::CodeMode;
use ums_console::ums_core::errors::{ConsoleError, ErrorKind};
use ums_console::ums_models::certification_programs::{
    CertificationLevel, CertificationProgramDto,
};
use ums_console::ums_models::faculties::FacultyDto;
use ums_console::ums_models::ids::SchoolId;
use ums_console::ums_models::schools::{School, SchoolDto};

#[tokio::test]
async fn test_create_faculty_with_derived_code() {
    let (backend, state) = spawn(seed()).await;
    let store = state.faculties();
    store.refresh().await.unwrap();
    assert_eq!(store.len(), 1);

    let dto = FacultyDto::new("Faculty of Engineering")
        .with_code(&CodeMode::Auto(3))
        .unwrap();
    assert_eq!(dto.code, "ENG");

    let created = store.create(dto).await.unwrap();
    assert!(created.id.is_some());
    assert_eq!(created.code, "ENG");

    let items = store.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].name, "Faculty of Engineering");
    assert!(items.iter().all(|f| f.id.is_some()));

    assert_eq!(backend.hits("POST", "/faculties"), 1);
    assert_eq!(backend.hits("GET", "/faculties"), 2);
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn test_code_lengths_for_same_name() {
    for (len, expected) in [(2, "EN"), (3, "ENG"), (4, "ENGI")] {
        let dto = FacultyDto::new("Faculty of Engineering")
            .with_code(&CodeMode::Auto(len))
            .unwrap();
        assert_eq!(dto.code, expected);
    }
}

#[tokio::test]
async fn test_duplicate_code_rolls_back_with_generic_message() {
    let (backend, state) = spawn(seed()).await;
    let store = state.faculties();
    store.refresh().await.unwrap();
    let before = store.items();

    let dto = FacultyDto::new("School of Sciences")
        .with_code(&CodeMode::Manual("sci".into()))
        .unwrap();
    let err = store.create(dto).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(!err.is_retryable());
    assert_eq!(store.items(), before);
    assert_eq!(
        store.error().as_deref(),
        Some("Failed to create faculty. Please try again.")
    );
    assert_eq!(backend.hits("GET", "/faculties"), 1);
}

#[tokio::test]
async fn test_backend_rejection_shows_generic_message() {
    let (backend, state) = spawn(seed()).await;
    let store = state.faculties();
    store.refresh().await.unwrap();
    let before = store.items();

    // Passes the local length rule; the backend trims it and refuses.
    let dto = FacultyDto::new("   ")
        .with_code(&CodeMode::Manual("BLK".into()))
        .unwrap();
    let err = store.create(dto).await.unwrap_err();

    assert!(matches!(err, ConsoleError::Rejected { status: 422, .. }));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(backend.hits("POST", "/faculties"), 1);
    assert_eq!(store.items(), before);
    assert_eq!(
        store.error().as_deref(),
        Some("Failed to create faculty. Please try again.")
    );
}

#[tokio::test]
async fn test_invalid_manual_code_never_reaches_backend() {
    let err = FacultyDto::new("Faculty of Law")
        .with_code(&CodeMode::Manual("L4W".into()))
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));
}

#[tokio::test]
async fn test_update_at_resolves_index_to_id() {
    let mut data = seed();
    data.faculties.push(faculty("Faculty of Arts", "ART"));
    let (backend, state) = spawn(data).await;
    let store = state.faculties();
    store.refresh().await.unwrap();

    let target = store.items()[1].clone();
    let dto = FacultyDto {
        description: Some("Humanities and languages".into()),
        ..FacultyDto::from(&target)
    };
    let updated = store.update_at(1, dto).await.unwrap();

    assert_eq!(updated.id, target.id);
    let items = store.items();
    assert_eq!(items[0].code, "SCI");
    assert_eq!(
        items[1].description.as_deref(),
        Some("Humanities and languages")
    );
    let id = target.id.unwrap();
    assert_eq!(backend.hits("PUT", &format!("/faculties/{id}")), 1);
}

#[tokio::test]
async fn test_out_of_range_index_makes_no_request() {
    let (backend, state) = spawn(seed()).await;
    let store = state.faculties();
    store.refresh().await.unwrap();

    let err = store.delete_at(7).await.unwrap_err();
    assert_eq!(err, ConsoleError::InvalidSelection { entity: "faculty" });
    assert_eq!(store.error().as_deref(), Some("Invalid faculty selected"));

    let err = store
        .update_at(3, FacultyDto::new("Faculty of Law"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(store.len(), 1);
    assert_eq!(backend.data().faculties.len(), 1);
    assert_eq!(backend.hits("GET", "/faculties"), 1);
}

#[tokio::test]
async fn test_failed_delete_restores_position() {
    let mut data = seed();
    data.faculties.push(faculty("Faculty of Arts", "ART"));
    data.faculties.push(faculty("Faculty of Law", "LAW"));
    let (backend, state) = spawn(data).await;
    let store = state.faculties();
    store.refresh().await.unwrap();
    let before = store.items();

    let id = before[1].id.unwrap();
    backend.fail_next("DELETE", &format!("/faculties/{id}"));
    let err = store.delete_at(1).await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(store.items(), before);
    assert_eq!(
        store.error().as_deref(),
        Some("Failed to delete faculty. Please try again.")
    );

    store.delete(id).await.unwrap();
    let codes: Vec<_> = store.items().into_iter().map(|f| f.code).collect();
    assert_eq!(codes, vec!["SCI", "LAW"]);
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn test_single_school_response_is_normalized() {
    let mut data = seed();
    let faculty_id = data.faculties[0].id;
    let dto = SchoolDto {
        code: "CS".into(),
        faculty_id,
        ..SchoolDto::new("School of Computing")
    };
    data.schools.push(School::from_dto(Some(SchoolId::new()), &dto));
    let (_backend, state) = spawn(data).await;

    let store = state.schools();
    store.refresh().await.unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.items()[0].code, "CS");

    let dto = SchoolDto::new("School of Mathematics")
        .with_code(&CodeMode::Auto(4))
        .unwrap();
    store.create(dto).await.unwrap();
    assert_eq!(store.len(), 2);

    let cancel = CancellationToken::new();
    let scoped = store
        .service()
        .get_schools_for_faculty(faculty_id.unwrap(), &cancel)
        .await
        .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].name, "School of Computing");
}

#[tokio::test]
async fn test_certification_program_lifecycle() {
    let (backend, state) = spawn(seed()).await;
    let store = state.certification_programs();
    store.refresh().await.unwrap();
    assert!(store.is_empty());

    let dto = CertificationProgramDto {
        duration_months: Some(6),
        ..CertificationProgramDto::new(
            "Certificate in Data Analysis",
            CertificationLevel::Certificate,
        )
    }
    .with_code(&CodeMode::default())
    .unwrap();
    let created = store.create(dto).await.unwrap();
    assert_eq!(created.code, "DAN");

    store.delete_at(0).await.unwrap();
    assert!(store.is_empty());
    assert!(backend.data().programs.is_empty());
}
