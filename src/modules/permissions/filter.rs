//! Filtering and selection over the permission catalog.
//!
//! Bulk selection is scoped: "select all" and "deselect all" only touch the
//! permissions that pass the active filter. Permissions hidden by the search
//! text or category keep their state.

use std::collections::HashSet;

use ums_models::ids::PermissionId;
use ums_models::roles::Permission;

/// An insertion-ordered set of permission ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSelection(Vec<PermissionId>);

impl PermissionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: PermissionId) -> bool {
        self.0.contains(&id)
    }

    pub fn insert(&mut self, id: PermissionId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn remove(&mut self, id: PermissionId) -> bool {
        let before = self.0.len();
        self.0.retain(|p| *p != id);
        self.0.len() != before
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: PermissionId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.0.push(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[PermissionId] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<PermissionId> {
        self.0.clone()
    }

    /// Set equality, ignoring order.
    pub fn same_as(&self, other: &[PermissionId]) -> bool {
        let mine: HashSet<_> = self.0.iter().collect();
        let theirs: HashSet<_> = other.iter().collect();
        mine == theirs
    }
}

impl FromIterator<PermissionId> for PermissionSelection {
    fn from_iter<I: IntoIterator<Item = PermissionId>>(iter: I) -> Self {
        let mut selection = PermissionSelection::new();
        for id in iter {
            selection.insert(id);
        }
        selection
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionFilter {
    /// Case-insensitive substring over name or code.
    pub search: String,
    /// Restricts to one category when set.
    pub category: Option<String>,
    /// Only permissions currently selected.
    pub selected_only: bool,
}

impl PermissionFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.category.is_some() || self.selected_only
    }

    pub fn matches(&self, permission: &Permission, selection: &PermissionSelection) -> bool {
        if let Some(category) = &self.category
            && permission.category() != category.to_lowercase()
        {
            return false;
        }
        if self.selected_only && !selection.contains(permission.id) {
            return false;
        }
        permission.matches_search(&self.search)
    }

    pub fn apply<'a, I>(&self, permissions: I, selection: &PermissionSelection) -> Vec<&'a Permission>
    where
        I: IntoIterator<Item = &'a Permission>,
    {
        permissions
            .into_iter()
            .filter(|p| self.matches(p, selection))
            .collect()
    }

    /// Selects every permission in `permissions` that passes the filter.
    pub fn select_visible<'a, I>(&self, permissions: I, selection: &mut PermissionSelection)
    where
        I: IntoIterator<Item = &'a Permission>,
    {
        let visible: Vec<PermissionId> = self
            .apply(permissions, selection)
            .into_iter()
            .map(|p| p.id)
            .collect();
        for id in visible {
            selection.insert(id);
        }
    }

    /// Deselects every permission in `permissions` that passes the filter.
    pub fn deselect_visible<'a, I>(&self, permissions: I, selection: &mut PermissionSelection)
    where
        I: IntoIterator<Item = &'a Permission>,
    {
        let visible: Vec<PermissionId> = self
            .apply(permissions, selection)
            .into_iter()
            .map(|p| p.id)
            .collect();
        for id in visible {
            selection.remove(id);
        }
    }
}
