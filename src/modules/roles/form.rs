//! Add/edit form for a single role.
//!
//! The form owns a draft of the role, its permission selection and an
//! optional embedded [`UserForm`]. Validation is synchronous; once the draft
//! differs from its starting point every change re-validates it. Persisting
//! is delegated to the async callback passed to [`RoleForm::submit`].

use std::future::Future;

use tracing::{debug, warn};
use ums_core::errors::{Action, ConsoleError, FieldErrors, failure_message};
use ums_models::ids::PermissionId;
use ums_models::roles::{Permission, Role, RoleUser};

use super::user_form::UserForm;
use super::validation::{RoleRules, validate_role};
use crate::modules::permissions::{PermissionFilter, PermissionSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    /// Editing the role at `index` of the role list.
    Edit { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// The draft has unsaved changes; the caller must confirm before discarding.
    NeedsConfirmation,
}

pub struct RoleForm {
    mode: FormMode,
    rules: RoleRules,
    siblings: Vec<String>,
    initial: Role,
    draft: Role,
    selection: PermissionSelection,
    catalog: Vec<Permission>,
    filter: PermissionFilter,
    user_form: Option<UserForm>,
    errors: FieldErrors,
    general_error: Option<String>,
    submitting: bool,
    /// Set once the draft first becomes dirty. Stays set when edits are undone.
    touched: bool,
    open: bool,
}

impl RoleForm {
    /// `siblings` are the names of all roles currently listed.
    pub fn add(rules: RoleRules, siblings: Vec<String>, catalog: Vec<Permission>) -> Self {
        Self::build(FormMode::Add, Role::default(), rules, siblings, catalog)
    }

    pub fn edit(
        index: usize,
        role: &Role,
        rules: RoleRules,
        siblings: Vec<String>,
        catalog: Vec<Permission>,
    ) -> Self {
        Self::build(FormMode::Edit { index }, role.clone(), rules, siblings, catalog)
    }

    fn build(
        mode: FormMode,
        initial: Role,
        rules: RoleRules,
        siblings: Vec<String>,
        catalog: Vec<Permission>,
    ) -> Self {
        Self {
            mode,
            rules,
            siblings,
            selection: initial.permissions.iter().copied().collect(),
            draft: initial.clone(),
            initial,
            catalog,
            filter: PermissionFilter::default(),
            user_form: None,
            errors: FieldErrors::new(),
            general_error: None,
            submitting: false,
            touched: false,
            open: true,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn draft(&self) -> &Role {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.revalidate();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        self.draft.description = (!description.is_empty()).then_some(description);
        self.revalidate();
    }

    pub fn is_selected(&self, id: PermissionId) -> bool {
        self.selection.contains(id)
    }

    pub fn selected(&self) -> &[PermissionId] {
        self.selection.ids()
    }

    pub fn toggle_permission(&mut self, id: PermissionId) -> bool {
        let selected = self.selection.toggle(id);
        self.sync_permissions();
        selected
    }

    pub fn filter(&self) -> &PermissionFilter {
        &self.filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.filter.category = category;
    }

    /// Catalog entries passing the current search and category filter.
    pub fn visible_permissions(&self) -> Vec<&Permission> {
        self.filter.apply(&self.catalog, &self.selection)
    }

    /// Selects every permission in the filtered view. Permissions hidden by
    /// the filter keep their current state.
    pub fn select_all_visible(&mut self) {
        self.filter.select_visible(&self.catalog, &mut self.selection);
        self.sync_permissions();
    }

    /// Deselects every permission in the filtered view only.
    pub fn deselect_all_visible(&mut self) {
        self.filter
            .deselect_visible(&self.catalog, &mut self.selection);
        self.sync_permissions();
    }

    fn sync_permissions(&mut self) {
        self.draft.permissions = self.selection.to_vec();
        self.revalidate();
    }

    pub fn users(&self) -> &[RoleUser] {
        &self.draft.users
    }

    pub fn user_form(&self) -> Option<&UserForm> {
        self.user_form.as_ref()
    }

    pub fn user_form_mut(&mut self) -> Option<&mut UserForm> {
        self.user_form.as_mut()
    }

    pub fn open_add_user(&mut self) -> &mut UserForm {
        self.user_form.insert(UserForm::add())
    }

    pub fn open_edit_user(&mut self, index: usize) -> Result<&mut UserForm, ConsoleError> {
        let user = self
            .draft
            .users
            .get(index)
            .ok_or(ConsoleError::InvalidSelection { entity: "user" })?;
        Ok(self.user_form.insert(UserForm::edit(index, user)))
    }

    /// Validates the open user sub-form and merges it into the draft.
    /// The sub-form stays open when it has errors.
    pub fn submit_user(&mut self) -> Result<(), ConsoleError> {
        let Some(form) = self.user_form.as_mut() else {
            return Err(ConsoleError::InvalidSelection { entity: "user" });
        };
        form.apply(&mut self.draft.users)
            .map_err(ConsoleError::Fields)?;
        self.user_form = None;
        self.revalidate();
        Ok(())
    }

    pub fn cancel_user(&mut self) {
        self.user_form = None;
    }

    pub fn remove_user(&mut self, index: usize) -> Option<RoleUser> {
        if index >= self.draft.users.len() {
            return None;
        }
        // Indices shift, so an open sub-form would point at the wrong user.
        self.user_form = None;
        let removed = self.draft.users.remove(index);
        self.revalidate();
        Some(removed)
    }

    /// Whether the draft differs from where it started. In add mode any
    /// non-empty field counts.
    pub fn is_dirty(&self) -> bool {
        let draft = &self.draft;
        match self.mode {
            FormMode::Add => {
                !draft.name.trim().is_empty()
                    || draft
                        .description
                        .as_deref()
                        .is_some_and(|d| !d.trim().is_empty())
                    || !self.selection.is_empty()
                    || !draft.users.is_empty()
            }
            FormMode::Edit { .. } => {
                draft.name != self.initial.name
                    || draft.description.as_deref().unwrap_or("")
                        != self.initial.description.as_deref().unwrap_or("")
                    || !self.selection.same_as(&self.initial.permissions)
                    || draft.users != self.initial.users
            }
        }
    }

    pub fn request_close(&mut self) -> CloseOutcome {
        if self.is_dirty() {
            return CloseOutcome::NeedsConfirmation;
        }
        self.close();
        CloseOutcome::Closed
    }

    /// Closes without checking for unsaved changes.
    pub fn close(&mut self) {
        self.open = false;
        self.user_form = None;
    }

    fn editing(&self) -> Option<usize> {
        match self.mode {
            FormMode::Add => None,
            FormMode::Edit { index } => Some(index),
        }
    }

    fn revalidate(&mut self) {
        self.touched |= self.is_dirty();
        if self.touched {
            self.validate();
        }
    }

    /// Runs full validation and returns whether the draft is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_role(&self.draft, &self.siblings, self.editing(), &self.rules);
        self.errors.is_empty()
    }

    /// The draft as it would be persisted.
    fn to_role(&self) -> Role {
        let description = self
            .draft
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Role {
            id: self.initial.id,
            name: self.draft.name.trim().to_string(),
            description,
            permissions: self.selection.to_vec(),
            users: self.draft.users.clone(),
        }
    }

    /// Validates and hands the role and its list position (edit mode) to
    /// `on_submit`. The form closes only when the callback succeeds;
    /// otherwise it keeps the draft and shows a general error.
    pub async fn submit<F, Fut>(&mut self, on_submit: F) -> Result<(), ConsoleError>
    where
        F: FnOnce(Role, Option<usize>) -> Fut,
        Fut: Future<Output = Result<(), ConsoleError>>,
    {
        self.general_error = None;
        if !self.validate() {
            return Err(ConsoleError::Fields(self.errors.clone()));
        }

        let action = match self.mode {
            FormMode::Add => Action::Create,
            FormMode::Edit { .. } => Action::Update,
        };
        self.submitting = true;
        let result = on_submit(self.to_role(), self.editing()).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                debug!(mode = ?self.mode, "Role form submitted");
                self.close();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Role form submission failed");
                self.general_error = Some(failure_message(action, "role", &err));
                Err(err)
            }
        }
    }
}
