//! Handlers behind the `ums-console` binary.
//!
//! Each handler builds the store or controller it needs from [`AppState`],
//! drives it like an interactive panel would and prints the outcome.
//!
//! [`AppState`]: crate::state::AppState

pub mod access;
pub mod tenant;
pub mod units;

use anyhow::{Context, bail};
use dialoguer::Confirm;
use serde::de::DeserializeOwned;

/// Asks a yes/no question unless `assume_yes` is set.
pub fn confirm(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

/// Parses a snake_case wire name such as `finance_office` into its enum.
pub fn parse_variant<T: DeserializeOwned>(kind: &str, value: &str) -> anyhow::Result<T> {
    let normalized = value.trim().to_lowercase().replace(['-', ' '], "_");
    match serde_json::from_value(serde_json::Value::String(normalized)) {
        Ok(variant) => Ok(variant),
        Err(_) => bail!("Unknown {kind} '{value}'"),
    }
}

fn mark(enabled: bool) -> &'static str {
    if enabled { "[x]" } else { "[ ]" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ums_models::modules::UmsModule;
    use ums_models::platforms::DesktopOffice;

    #[test]
    fn test_parse_variant_accepts_loose_spelling() {
        let office: DesktopOffice = parse_variant("office", "Finance-Office").unwrap();
        assert_eq!(office, DesktopOffice::FinanceOffice);
        let module: UmsModule = parse_variant("module", "human resources").unwrap();
        assert_eq!(module, UmsModule::HumanResources);
        assert!(parse_variant::<UmsModule>("module", "canteen").is_err());
    }
}
