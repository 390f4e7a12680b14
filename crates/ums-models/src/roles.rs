//! Role, permission and role-user models.
//!
//! A role bundles a set of permission ids with the user credentials that are
//! embedded directly in it. At most one of those users may be primary.

use serde::{Deserialize, Serialize};
use ums_core::permissions::category_of;

use crate::ids::{PermissionId, RoleId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: PermissionId,
    /// Upper snake case name, e.g. `USER_CREATE`.
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Permission {
    /// The explicit category, or the one derived from the name.
    pub fn category(&self) -> String {
        match &self.category {
            Some(category) if !category.trim().is_empty() => category.trim().to_lowercase(),
            _ => category_of(&self.name),
        }
    }

    /// Case-insensitive substring match against name or code.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self
                .code
                .as_deref()
                .is_some_and(|code| code.to_lowercase().contains(&needle))
    }
}

/// Permissions of one category, as served by the grouped catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGroup {
    pub category: String,
    pub permissions: Vec<Permission>,
}

/// Groups a flat permission list by category, keeping first-seen order.
pub fn group_permissions(permissions: Vec<Permission>) -> Vec<PermissionGroup> {
    let mut groups: Vec<PermissionGroup> = Vec::new();
    for permission in permissions {
        let category = permission.category();
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.permissions.push(permission),
            None => groups.push(PermissionGroup {
                category,
                permissions: vec![permission],
            }),
        }
    }
    groups
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleUser {
    pub email: String,
    /// Only sent when creating the user or changing the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RoleId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<PermissionId>,
    #[serde(default)]
    pub users: Vec<RoleUser>,
}

impl Role {
    pub fn has_permission(&self, id: PermissionId) -> bool {
        self.permissions.contains(&id)
    }

    pub fn primary_user(&self) -> Option<&RoleUser> {
        self.users.iter().find(|u| u.is_primary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPermissionsDto {
    pub permission_ids: Vec<PermissionId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn permission(name: &str) -> Permission {
        Permission {
            id: PermissionId::new(),
            name: name.to_string(),
            code: None,
            description: None,
            category: None,
        }
    }

    #[test]
    fn test_category_derived_from_name() {
        assert_eq!(permission("USER_CREATE").category(), "user");

        let mut explicit = permission("USER_CREATE");
        explicit.category = Some("Accounts".into());
        assert_eq!(explicit.category(), "accounts");
    }

    #[test]
    fn test_matches_search_on_name_or_code() {
        let mut p = permission("STUDENT_READ");
        p.code = Some("stu.read".into());
        assert!(p.matches_search("student"));
        assert!(p.matches_search("STU.R"));
        assert!(p.matches_search("  "));
        assert!(!p.matches_search("finance"));
    }

    #[test]
    fn test_group_permissions_keeps_order() {
        let groups = group_permissions(vec![
            permission("USER_CREATE"),
            permission("ROLE_MANAGE"),
            permission("USER_DELETE"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "user");
        assert_eq!(groups[0].permissions.len(), 2);
        assert_eq!(groups[1].category, "role");
    }

    #[test]
    fn test_role_user_wire_format() {
        let user: RoleUser =
            serde_json::from_value(json!({"email": "a@b.co", "isPrimary": true})).unwrap();
        assert!(user.is_primary);
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
    }
}
