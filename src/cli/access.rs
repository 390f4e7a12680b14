//! Platforms, modules, roles and permission assignment.

use anyhow::{Context, bail};
use tokio_util::sync::CancellationToken;
use ums_models::modules::UmsModule;
use ums_models::platforms::{DesktopOffice, PlatformApp};

use super::{confirm, mark, parse_variant};
use crate::modules::permissions::PermissionsDrawer;
use crate::modules::platforms::ToggleOutcome;
use crate::state::AppState;

pub async fn show_platforms(state: &AppState) -> anyhow::Result<()> {
    let mut controller = state.platforms();
    controller
        .load()
        .await
        .context("Failed to fetch platform settings")?;

    let platforms = controller.draft();
    println!("Apps");
    println!("  {} {}", mark(platforms.teacher_app), PlatformApp::TeacherApp);
    println!("  {} {}", mark(platforms.student_app), PlatformApp::StudentApp);
    println!("Desktop offices");
    for office in DesktopOffice::ALL {
        println!("  {} {}", mark(platforms.has_office(office)), office);
    }
    Ok(())
}

/// Turns an app on or off. Turning one off asks for confirmation first.
pub async fn set_app(
    state: &AppState,
    app: PlatformApp,
    enabled: bool,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let mut controller = state.platforms();
    controller
        .load()
        .await
        .context("Failed to fetch platform settings")?;

    if controller.draft().app(app) == enabled {
        println!("{app} is already {}.", if enabled { "enabled" } else { "disabled" });
        return Ok(());
    }

    if controller.request_toggle(app) == ToggleOutcome::NeedsConfirmation {
        let prompt = format!("Disable {app}? Users will lose access immediately.");
        if !confirm(&prompt, assume_yes)? {
            controller.cancel_pending();
            println!("Cancelled.");
            return Ok(());
        }
        controller.confirm_pending();
    }

    controller.save().await?;
    println!("✅ {app} {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

pub async fn toggle_office(state: &AppState, office: &str) -> anyhow::Result<()> {
    let office: DesktopOffice = parse_variant("office", office)?;
    let mut controller = state.platforms();
    controller
        .load()
        .await
        .context("Failed to fetch platform settings")?;

    controller.toggle_office(office);
    let enabled = controller.draft().has_office(office);
    controller.save().await?;
    println!("✅ {office} {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

pub async fn list_modules(state: &AppState) -> anyhow::Result<()> {
    let mut controller = state.modules();
    controller.load().await.context("Failed to fetch modules")?;
    for (module, enabled) in controller.catalog() {
        println!("  {} {}", mark(enabled), module);
    }
    Ok(())
}

pub async fn toggle_modules(state: &AppState, names: &[String]) -> anyhow::Result<()> {
    let modules = names
        .iter()
        .map(|name| parse_variant::<UmsModule>("module", name))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut controller = state.modules();
    controller.load().await.context("Failed to fetch modules")?;
    for module in &modules {
        controller.toggle(*module);
    }
    if !controller.is_dirty() {
        println!("Nothing to change.");
        return Ok(());
    }

    controller.save().await?;
    for module in modules {
        let status = if controller.is_enabled(module) { "enabled" } else { "disabled" };
        println!("✅ {module} {status}");
    }
    Ok(())
}

pub async fn list_roles(state: &AppState) -> anyhow::Result<()> {
    let store = state.roles();
    store.refresh().await.context("Failed to fetch roles")?;

    if store.is_empty() {
        println!("No roles yet.");
    }
    for (index, role) in store.items().iter().enumerate() {
        let primary = role
            .primary_user()
            .map(|u| format!(", primary: {}", u.email))
            .unwrap_or_default();
        println!(
            "{:>3}. {} ({} permissions, {} users{})",
            index + 1,
            role.name,
            role.permissions.len(),
            role.users.len(),
            primary
        );
    }
    Ok(())
}

/// Shows or changes the permissions of the role at 1-based `position`.
///
/// `grant` and `revoke` take permission names (`USER_CREATE`) or whole
/// categories (`user`).
pub async fn role_permissions(
    state: &AppState,
    position: usize,
    grant: &[String],
    revoke: &[String],
) -> anyhow::Result<()> {
    let store = state.roles();
    store.refresh().await.context("Failed to fetch roles")?;
    let Some(role) = store.items().into_iter().nth(position.saturating_sub(1)) else {
        bail!("Invalid role selected");
    };
    let Some(role_id) = role.id else {
        bail!("Role '{}' has not been saved yet", role.name);
    };

    let mut drawer = state.permissions_drawer();
    drawer
        .open(&role)
        .await
        .context("Failed to fetch permissions")?;

    if grant.is_empty() && revoke.is_empty() {
        println!("{}", role.name);
        for group in drawer.visible_groups() {
            let summary = drawer.category_state(&group.category);
            println!("  {} ({}/{})", group.category, summary.selected, summary.visible);
            for permission in &group.permissions {
                println!("    {} {}", mark(drawer.is_selected(permission.id)), permission.name);
            }
        }
        drawer.close();
        return Ok(());
    }

    for (names, granting) in [(grant, true), (revoke, false)] {
        for name in names {
            apply(&mut drawer, name, granting)?;
        }
    }

    let Some(ids) = drawer.save() else {
        bail!("Permission drawer closed unexpectedly");
    };
    let updated = store
        .service()
        .assign_permissions(role_id, ids, &CancellationToken::new())
        .await?;
    store.refresh().await?;
    println!(
        "✅ {} now has {} permissions",
        updated.name,
        updated.permissions.len()
    );
    Ok(())
}

fn apply(drawer: &mut PermissionsDrawer, name: &str, granting: bool) -> anyhow::Result<()> {
    let category = name.trim().to_lowercase();
    if drawer.category_state(&category).visible > 0 {
        if granting {
            drawer.select_category(&category);
        } else {
            drawer.deselect_category(&category);
        }
        return Ok(());
    }

    let wanted = name.trim().to_uppercase();
    let permission = drawer
        .visible_groups()
        .into_iter()
        .flat_map(|g| g.permissions)
        .find(|p| p.name == wanted)
        .with_context(|| format!("Unknown permission '{name}'"))?;
    if drawer.is_selected(permission.id) != granting {
        drawer.toggle(permission.id);
    }
    Ok(())
}
