//! Faculties, schools and certification programs.

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use ums_core::codes::CodeMode;
use ums_models::faculties::FacultyDto;
use ums_models::ids::FacultyId;

use super::confirm;
use crate::state::AppState;

pub async fn list_faculties(state: &AppState) -> anyhow::Result<()> {
    let store = state.faculties();
    store.refresh().await.context("Failed to fetch faculties")?;

    if store.is_empty() {
        println!("No faculties yet.");
        return Ok(());
    }
    for (index, faculty) in store.items().iter().enumerate() {
        println!(
            "{:>3}. {:<5} {}{}",
            index + 1,
            faculty.code,
            faculty.name,
            faculty
                .dean
                .as_deref()
                .map(|dean| format!(" (Dean: {dean})"))
                .unwrap_or_default()
        );
    }
    Ok(())
}

pub async fn create_faculty(
    state: &AppState,
    name: String,
    code: Option<String>,
    code_length: usize,
    description: Option<String>,
    dean: Option<String>,
) -> anyhow::Result<()> {
    let mode = match code {
        Some(code) => CodeMode::Manual(code),
        None => CodeMode::Auto(code_length),
    };
    let dto = FacultyDto {
        description,
        dean,
        ..FacultyDto::new(name)
    }
    .with_code(&mode)?;

    let store = state.faculties();
    let faculty = store.create(dto).await?;
    println!("✅ Created faculty {} ({})", faculty.name, faculty.code);
    Ok(())
}

/// `position` is 1-based, as printed by [`list_faculties`].
pub async fn delete_faculty(
    state: &AppState,
    position: usize,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let store = state.faculties();
    store.refresh().await.context("Failed to fetch faculties")?;

    let index = position.saturating_sub(1);
    let Some(faculty) = store.items().into_iter().nth(index) else {
        anyhow::bail!("Invalid faculty selected");
    };
    if !confirm(&format!("Delete faculty '{}'?", faculty.name), assume_yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_at(index).await?;
    println!("🗑️  Deleted faculty {}", faculty.name);
    Ok(())
}

pub async fn list_schools(state: &AppState, faculty: Option<FacultyId>) -> anyhow::Result<()> {
    let store = state.schools();
    let schools = match faculty {
        Some(faculty_id) => {
            store
                .service()
                .get_schools_for_faculty(faculty_id, &CancellationToken::new())
                .await?
        }
        None => {
            store.refresh().await.context("Failed to fetch schools")?;
            store.items()
        }
    };

    if schools.is_empty() {
        println!("No schools found.");
    }
    for (index, school) in schools.iter().enumerate() {
        println!("{:>3}. {:<5} {}", index + 1, school.code, school.name);
    }
    Ok(())
}

pub async fn list_programs(state: &AppState) -> anyhow::Result<()> {
    let store = state.certification_programs();
    store
        .refresh()
        .await
        .context("Failed to fetch certification programs")?;

    if store.is_empty() {
        println!("No certification programs yet.");
    }
    for (index, program) in store.items().iter().enumerate() {
        let duration = program
            .duration_months
            .map(|months| format!(", {months} months"))
            .unwrap_or_default();
        println!(
            "{:>3}. {:<5} {} [{:?}{}]",
            index + 1,
            program.code,
            program.name,
            program.level,
            duration
        );
    }
    Ok(())
}
