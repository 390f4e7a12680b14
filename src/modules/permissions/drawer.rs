//! Assigns permissions to an existing role.
//!
//! The drawer loads the grouped catalog when opened and tracks its own
//! selection, seeded from the role. Saving hands the selection back to the
//! caller, who persists it.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use ums_core::errors::{Action, ConsoleError, failure_message};
use ums_models::ids::{PermissionId, RoleId};
use ums_models::roles::{PermissionGroup, Role};

use super::filter::{PermissionFilter, PermissionSelection};
use super::service::PermissionService;

/// Selection summary of one category within the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryState {
    pub selected: usize,
    pub visible: usize,
}

impl CategoryState {
    pub fn all_selected(&self) -> bool {
        self.visible > 0 && self.selected == self.visible
    }
}

pub struct PermissionsDrawer {
    service: PermissionService,
    open: bool,
    role_id: Option<RoleId>,
    groups: Vec<PermissionGroup>,
    selection: PermissionSelection,
    filter: PermissionFilter,
    loading: bool,
    error: Option<String>,
    cancel: CancellationToken,
}

impl PermissionsDrawer {
    pub fn new(service: PermissionService) -> Self {
        Self {
            service,
            open: false,
            role_id: None,
            groups: Vec::new(),
            selection: PermissionSelection::new(),
            filter: PermissionFilter::default(),
            loading: false,
            error: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Opens the drawer for `role` and loads the catalog.
    ///
    /// The drawer stays open when loading fails so the error can be shown.
    pub async fn open(&mut self, role: &Role) -> Result<(), ConsoleError> {
        self.open = true;
        self.role_id = role.id;
        self.selection = role.permissions.iter().copied().collect();
        self.filter = PermissionFilter::default();
        self.error = None;
        self.loading = true;

        let result = self.service.get_grouped_permissions(&self.cancel).await;
        self.loading = false;
        match result {
            Ok(groups) => {
                debug!(groups = groups.len(), "Permission catalog loaded");
                self.groups = groups;
                Ok(())
            }
            Err(err) => {
                if !matches!(err, ConsoleError::Cancelled) {
                    warn!(error = %err, "Loading permission catalog failed");
                    self.error = Some(failure_message(Action::Fetch, "permissions", &err));
                }
                Err(err)
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn role_id(&self) -> Option<RoleId> {
        self.role_id
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> &PermissionFilter {
        &self.filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_selected_only(&mut self, selected_only: bool) {
        self.filter.selected_only = selected_only;
    }

    pub fn is_selected(&self, id: PermissionId) -> bool {
        self.selection.contains(id)
    }

    pub fn selected(&self) -> &[PermissionId] {
        self.selection.ids()
    }

    pub fn toggle(&mut self, id: PermissionId) -> bool {
        self.selection.toggle(id)
    }

    /// Groups with only the permissions passing the filter; empty groups are dropped.
    pub fn visible_groups(&self) -> Vec<PermissionGroup> {
        self.groups
            .iter()
            .filter_map(|group| {
                let permissions: Vec<_> = self
                    .filter
                    .apply(&group.permissions, &self.selection)
                    .into_iter()
                    .cloned()
                    .collect();
                (!permissions.is_empty()).then(|| PermissionGroup {
                    category: group.category.clone(),
                    permissions,
                })
            })
            .collect()
    }

    pub fn category_state(&self, category: &str) -> CategoryState {
        let Some(group) = self.group(category) else {
            return CategoryState {
                selected: 0,
                visible: 0,
            };
        };
        let visible = self.filter.apply(&group.permissions, &self.selection);
        CategoryState {
            selected: visible
                .iter()
                .filter(|p| self.selection.contains(p.id))
                .count(),
            visible: visible.len(),
        }
    }

    /// Selects the visible permissions of `category`.
    pub fn select_category(&mut self, category: &str) {
        if let Some(group) = self.groups.iter().find(|g| g.category == category) {
            self.filter
                .select_visible(&group.permissions, &mut self.selection);
        }
    }

    /// Deselects the visible permissions of `category`.
    pub fn deselect_category(&mut self, category: &str) {
        if let Some(group) = self.groups.iter().find(|g| g.category == category) {
            self.filter
                .deselect_visible(&group.permissions, &mut self.selection);
        }
    }

    /// Emits the selection and closes. `None` when the drawer is not open.
    pub fn save(&mut self) -> Option<Vec<PermissionId>> {
        if !self.open {
            return None;
        }
        let ids = self.selection.to_vec();
        self.close();
        Some(ids)
    }

    pub fn close(&mut self) {
        self.open = false;
        self.role_id = None;
        self.filter = PermissionFilter::default();
        self.error = None;
    }

    fn group(&self, category: &str) -> Option<&PermissionGroup> {
        self.groups.iter().find(|g| g.category == category)
    }

    #[cfg(test)]
    fn with_catalog(service: PermissionService, role: &Role, groups: Vec<PermissionGroup>) -> Self {
        let mut drawer = Self::new(service);
        drawer.open = true;
        drawer.role_id = role.id;
        drawer.selection = role.permissions.iter().copied().collect();
        drawer.groups = groups;
        drawer
    }
}

impl Drop for PermissionsDrawer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
