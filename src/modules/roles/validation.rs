//! Synchronous, field-scoped validation of role drafts and role users.

use ums_config::{ConsoleConfig, MIN_PASSWORD_LEN};
use ums_core::errors::FieldErrors;
use ums_models::roles::{Role, RoleUser};
use validator::ValidateEmail;

pub const NAME_REQUIRED: &str = "Role name is required";
pub const NAME_CHARSET: &str =
    "Role name can only contain letters, numbers, spaces, hyphens, and underscores";
pub const NAME_TAKEN: &str = "A role with this name already exists";
pub const PERMISSIONS_REQUIRED: &str = "At least one permission must be selected";

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const EMAIL_TAKEN: &str = "A user with this email already exists in this role";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PRIMARY_TAKEN: &str = "Only one primary user is allowed per role";

/// Length limits applied to role drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRules {
    pub name_max_len: usize,
    pub description_max_len: usize,
}

impl Default for RoleRules {
    fn default() -> Self {
        RoleRules::from(&ConsoleConfig::default())
    }
}

impl From<&ConsoleConfig> for RoleRules {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            name_max_len: config.role_name_max_len,
            description_max_len: config.role_description_max_len,
        }
    }
}

/// `^[a-zA-Z0-9\s_-]+$`
fn is_allowed_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || c == '_' || c == '-'
}

/// Checks a role name against the rules and its sibling names.
///
/// `editing` is the position of the role being edited within `siblings`,
/// which is excluded from the uniqueness check.
pub fn validate_role_name(
    name: &str,
    siblings: &[String],
    editing: Option<usize>,
    rules: &RoleRules,
) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Some(NAME_REQUIRED.to_string());
    }
    if trimmed.chars().count() > rules.name_max_len {
        return Some(format!(
            "Role name must be at most {} characters",
            rules.name_max_len
        ));
    }
    if !trimmed.chars().all(is_allowed_name_char) {
        return Some(NAME_CHARSET.to_string());
    }

    let lowered = trimmed.to_lowercase();
    let taken = siblings
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != editing)
        .any(|(_, other)| other.trim().to_lowercase() == lowered);
    taken.then(|| NAME_TAKEN.to_string())
}

pub fn validate_role(
    role: &Role,
    siblings: &[String],
    editing: Option<usize>,
    rules: &RoleRules,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(message) = validate_role_name(&role.name, siblings, editing, rules) {
        errors.add("name", message);
    }

    let description_len = role
        .description
        .as_deref()
        .map(|d| d.chars().count())
        .unwrap_or(0);
    if description_len > rules.description_max_len {
        errors.add(
            "description",
            format!(
                "Description must be at most {} characters",
                rules.description_max_len
            ),
        );
    }

    if role.permissions.is_empty() {
        errors.add("permissions", PERMISSIONS_REQUIRED);
    }

    errors
}

/// Validates a user against the other users of the same role draft.
///
/// `editing` is the user's position in `users` when editing an existing
/// entry; a password is only mandatory when adding.
pub fn validate_role_user(user: &RoleUser, users: &[RoleUser], editing: Option<usize>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let others = || {
        users
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != editing)
            .map(|(_, u)| u)
    };

    let email = user.email.trim();
    if email.is_empty() {
        errors.add("email", EMAIL_REQUIRED);
    } else if !email.validate_email() {
        errors.add("email", EMAIL_INVALID);
    } else if others().any(|u| u.email.trim().eq_ignore_ascii_case(email)) {
        errors.add("email", EMAIL_TAKEN);
    }

    match user.password.as_deref().filter(|p| !p.is_empty()) {
        None if editing.is_none() => errors.add("password", PASSWORD_REQUIRED),
        Some(password) if password.chars().count() < MIN_PASSWORD_LEN => errors.add(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ),
        _ => {}
    }

    if user.is_primary && others().any(|u| u.is_primary) {
        errors.add("isPrimary", PRIMARY_TAKEN);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use ums_models::ids::PermissionId;

    fn rules() -> RoleRules {
        RoleRules {
            name_max_len: 20,
            description_max_len: 30,
        }
    }

    fn siblings() -> Vec<String> {
        vec!["Registrar".to_string(), "Bursar".to_string()]
    }

    fn user(email: &str, password: Option<&str>, is_primary: bool) -> RoleUser {
        RoleUser {
            email: email.to_string(),
            password: password.map(str::to_string),
            is_primary,
        }
    }

    #[test]
    fn test_valid_names_pass() {
        for name in ["Exam Officer", "dean_of-students", "Level 2 Adviser"] {
            assert_eq!(validate_role_name(name, &siblings(), None, &rules()), None);
        }
    }

    #[test]
    fn test_name_failures_have_specific_messages() {
        let r = rules();
        assert_eq!(
            validate_role_name("   ", &siblings(), None, &r).as_deref(),
            Some(NAME_REQUIRED)
        );
        assert_eq!(
            validate_role_name(&"x".repeat(21), &siblings(), None, &r).as_deref(),
            Some("Role name must be at most 20 characters")
        );
        assert_eq!(
            validate_role_name("Head@Dept", &siblings(), None, &r).as_deref(),
            Some(NAME_CHARSET)
        );
        assert_eq!(
            validate_role_name("REGISTRAR", &siblings(), None, &r).as_deref(),
            Some(NAME_TAKEN)
        );
    }

    #[test]
    fn test_edit_mode_excludes_self() {
        assert_eq!(
            validate_role_name("registrar", &siblings(), Some(0), &rules()),
            None
        );
        assert_eq!(
            validate_role_name("bursar", &siblings(), Some(0), &rules()).as_deref(),
            Some(NAME_TAKEN)
        );
    }

    #[test]
    fn test_empty_permissions_always_fail() {
        let role = Role {
            name: "Exam Officer".into(),
            ..Default::default()
        };
        let errors = validate_role(&role, &siblings(), None, &rules());
        assert_eq!(errors.get("permissions"), Some(PERMISSIONS_REQUIRED));
        assert!(!errors.contains("name"));

        let with_permission = Role {
            permissions: vec![PermissionId::new()],
            ..role
        };
        assert!(validate_role(&with_permission, &siblings(), None, &rules()).is_empty());
    }

    #[test]
    fn test_description_cap() {
        let role = Role {
            name: "Exam Officer".into(),
            description: Some("d".repeat(31)),
            permissions: vec![PermissionId::new()],
            ..Default::default()
        };
        let errors = validate_role(&role, &siblings(), None, &rules());
        assert_eq!(
            errors.get("description"),
            Some("Description must be at most 30 characters")
        );
    }

    #[test]
    fn test_user_email_rules() {
        let existing = vec![user("dean@acme.edu", None, false)];
        let errors = validate_role_user(&user("", Some("secret1"), false), &existing, None);
        assert_eq!(errors.get("email"), Some(EMAIL_REQUIRED));

        let errors = validate_role_user(&user("not-an-email", Some("secret1"), false), &existing, None);
        assert_eq!(errors.get("email"), Some(EMAIL_INVALID));

        let errors = validate_role_user(&user("DEAN@acme.edu", Some("secret1"), false), &existing, None);
        assert_eq!(errors.get("email"), Some(EMAIL_TAKEN));

        let errors = validate_role_user(&user("dean@acme.edu", None, false), &existing, Some(0));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_user_password_rules() {
        let errors = validate_role_user(&user("a@acme.edu", None, false), &[], None);
        assert_eq!(errors.get("password"), Some(PASSWORD_REQUIRED));

        let errors = validate_role_user(&user("a@acme.edu", Some("12345"), false), &[], None);
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );

        let existing = vec![user("a@acme.edu", None, false)];
        let errors = validate_role_user(&user("a@acme.edu", Some(""), false), &existing, Some(0));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_single_primary_user() {
        let mut users = vec![user("first@acme.edu", None, true)];
        let second = user("second@acme.edu", Some("secret1"), true);

        let errors = validate_role_user(&second, &users, None);
        assert_eq!(errors.get("isPrimary"), Some(PRIMARY_TAKEN));

        users[0].is_primary = false;
        assert!(validate_role_user(&second, &users, None).is_empty());

        users.clear();
        assert!(validate_role_user(&second, &users, None).is_empty());
    }
}
