//! Sub-form for adding or editing a user embedded in a role.

use ums_core::errors::FieldErrors;
use ums_models::roles::RoleUser;

use super::validation::validate_role_user;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFormMode {
    Add,
    Edit { index: usize },
}

/// Sub-form for one user embedded in a role draft.
#[derive(Debug, Clone)]
pub struct UserForm {
    mode: UserFormMode,
    email: String,
    password: String,
    is_primary: bool,
    errors: FieldErrors,
}

impl UserForm {
    pub fn add() -> Self {
        Self {
            mode: UserFormMode::Add,
            email: String::new(),
            password: String::new(),
            is_primary: false,
            errors: FieldErrors::new(),
        }
    }

    /// Starts editing `user`. The password field starts blank and is only
    /// sent when filled in.
    pub fn edit(index: usize, user: &RoleUser) -> Self {
        Self {
            mode: UserFormMode::Edit { index },
            email: user.email.clone(),
            password: String::new(),
            is_primary: user.is_primary,
            errors: FieldErrors::new(),
        }
    }

    pub fn mode(&self) -> UserFormMode {
        self.mode
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn set_primary(&mut self, is_primary: bool) {
        self.is_primary = is_primary;
    }

    fn editing(&self) -> Option<usize> {
        match self.mode {
            UserFormMode::Add => None,
            UserFormMode::Edit { index } => Some(index),
        }
    }

    fn to_user(&self) -> RoleUser {
        RoleUser {
            email: self.email.trim().to_string(),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            is_primary: self.is_primary,
        }
    }

    /// Validates against the role's current users and merges the result into
    /// them: replaced in place when editing, appended when adding.
    pub(crate) fn apply(&mut self, users: &mut Vec<RoleUser>) -> Result<(), FieldErrors> {
        let user = self.to_user();
        self.errors = validate_role_user(&user, users, self.editing());
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }

        match self.editing() {
            Some(index) if index < users.len() => {
                let previous = &users[index];
                users[index] = RoleUser {
                    password: user.password.or_else(|| previous.password.clone()),
                    ..user
                };
            }
            _ => users.push(user),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, is_primary: bool) -> RoleUser {
        RoleUser {
            email: email.to_string(),
            password: Some("hunter22".to_string()),
            is_primary,
        }
    }

    #[test]
    fn test_add_requires_password() {
        let mut users = Vec::new();
        let mut form = UserForm::add();
        form.set_email("clerk@acme.edu");

        let errors = form.apply(&mut users).unwrap_err();
        assert!(errors.contains("password"));
        assert!(users.is_empty());

        form.set_password("abc");
        assert!(form.apply(&mut users).unwrap_err().contains("password"));

        form.set_password("abcdef");
        form.apply(&mut users).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].password.as_deref(), Some("abcdef"));
    }

    #[test]
    fn test_edit_keeps_password_when_blank() {
        let mut users = vec![user("a@acme.edu", true), user("b@acme.edu", false)];
        let mut form = UserForm::edit(1, &users[1]);
        assert_eq!(form.email(), "b@acme.edu");

        form.set_email("c@acme.edu");
        form.apply(&mut users).unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].email, "c@acme.edu");
        assert_eq!(users[1].password.as_deref(), Some("hunter22"));
    }

    #[test]
    fn test_email_unique_except_self() {
        let mut users = vec![user("a@acme.edu", false), user("b@acme.edu", false)];

        let mut form = UserForm::edit(0, &users[0]);
        form.set_email("A@acme.edu");
        form.apply(&mut users).unwrap();

        let mut form = UserForm::add();
        form.set_email("B@ACME.EDU");
        form.set_password("secret1");
        assert!(form.apply(&mut users).unwrap_err().contains("email"));
    }

    #[test]
    fn test_second_primary_rejected() {
        let mut users = vec![user("a@acme.edu", true)];
        let mut form = UserForm::add();
        form.set_email("b@acme.edu");
        form.set_password("secret1");
        form.set_primary(true);

        let errors = form.apply(&mut users).unwrap_err();
        assert!(errors.contains("isPrimary"));
        assert_eq!(form.errors(), &errors);
    }
}
