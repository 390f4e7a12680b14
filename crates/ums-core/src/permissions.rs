//! Permission naming conventions.
//!
//! Permission names are `CATEGORY_ACTION` in upper snake case. The category
//! used for grouping is the first underscore-delimited token, lowercased.

/// Returns the grouping category of a permission name.
///
/// `USER_CREATE` → `user`, `REPORTS` → `reports`. An empty or
/// underscore-led name falls back to `general`.
pub fn category_of(name: &str) -> String {
    match name.split('_').next() {
        Some(token) if !token.trim().is_empty() => token.trim().to_lowercase(),
        _ => "general".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("USER_CREATE"), "user");
        assert_eq!(category_of("SETTINGS_UPDATE"), "settings");
        assert_eq!(category_of("REPORTS"), "reports");
        assert_eq!(category_of("_HIDDEN"), "general");
        assert_eq!(category_of(""), "general");
    }
}
