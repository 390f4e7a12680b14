//! Tenant summary and deletion.

use anyhow::Context;
use dialoguer::{Confirm, Input};

use crate::state::AppState;

pub async fn show_intro(state: &AppState) -> anyhow::Result<()> {
    let mut shell = state.settings();
    shell.load().await.context("Failed to fetch institution")?;
    let Some(intro) = shell.intro() else {
        anyhow::bail!("Institution details are not available");
    };

    println!("{}", intro.name);
    if let Some(kind) = &intro.ums_type {
        println!("  Type:     {kind}");
    }
    println!("  Status:   {}", intro.status);
    println!("  Modules:  {}", intro.module_count);
    println!(
        "  Apps:     teacher {}, student {}",
        on_off(intro.teacher_app),
        on_off(intro.student_app)
    );
    println!("  Created:  {}", intro.created_at.format("%Y-%m-%d"));

    let general = &shell.form().general;
    if let Some(email) = &general.email {
        println!("  Email:    {email}");
    }
    if let Some(website) = &general.website {
        println!("  Website:  {website}");
    }
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// Walks the danger zone: the exact institution name must be typed and the
/// warning acknowledged before anything is deleted.
pub async fn delete_tenant(state: &AppState) -> anyhow::Result<()> {
    let mut shell = state.settings();
    shell.load().await.context("Failed to fetch institution")?;
    let Some(name) = shell.danger_zone().tenant_name().map(str::to_string) else {
        anyhow::bail!("Institution details are not available");
    };

    println!("⚠️  This permanently deletes '{name}' and all of its data. It cannot be undone.");
    shell.danger_zone_mut().open();

    let typed: String = Input::new()
        .with_prompt(format!("Type '{name}' to confirm"))
        .allow_empty(true)
        .interact_text()
        .context("Failed to read confirmation")?;
    let acknowledged = Confirm::new()
        .with_prompt("I understand this action is irreversible")
        .default(false)
        .interact()
        .context("Failed to read acknowledgement")?;

    let zone = shell.danger_zone_mut();
    zone.set_confirmation(typed);
    zone.set_acknowledged(acknowledged);
    if !zone.is_armed() {
        zone.dismiss();
        println!("Confirmation did not match. Nothing was deleted.");
        return Ok(());
    }

    shell.delete_tenant().await?;
    println!("🗑️  Deleted {name}");
    Ok(())
}
