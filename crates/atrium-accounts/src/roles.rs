//! Role directory: resolves a user's effective permission codes.

use std::collections::BTreeSet;

use dashmap::DashMap;

use atrium_commons::{Role, RoleId, User};

/// Resolver from a user to their effective permission codes.
///
/// Implementations compute the ordered union of the permission codes of
/// the user's enabled roles. The result is ordered and duplicate-free.
pub trait PermissionResolver: Send + Sync {
    fn permissions_for(&self, user: &User) -> Vec<String>;
}

/// In-memory role directory.
pub struct RoleDirectory {
    roles: DashMap<RoleId, Role>,
}

impl RoleDirectory {
    pub fn new() -> Self {
        Self { roles: DashMap::new() }
    }

    pub fn upsert_role(&self, role: Role) {
        self.roles.insert(role.role_id.clone(), role);
    }

    pub fn get_role(&self, role_id: &RoleId) -> Option<Role> {
        self.roles.get(role_id).map(|entry| entry.value().clone())
    }
}

impl Default for RoleDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionResolver for RoleDirectory {
    fn permissions_for(&self, user: &User) -> Vec<String> {
        let mut codes = BTreeSet::new();
        for role_id in &user.role_ids {
            if let Some(role) = self.roles.get(role_id) {
                if role.enabled {
                    codes.extend(role.permission_codes.iter().cloned());
                }
            }
        }
        codes.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_commons::{UserId, UserStatus};
    use rust_decimal::Decimal;

    fn user_with_roles(roles: Vec<RoleId>) -> User {
        User {
            user_id: UserId::new("u_1"),
            username: "alice".into(),
            password_hash: String::new(),
            email: None,
            display_name: None,
            is_root: false,
            status: UserStatus::Enabled,
            balance: Decimal::ZERO,
            role_ids: roles,
            external_identity: None,
            created_at: 0,
            updated_at: 0,
            last_login_at: None,
        }
    }

    #[test]
    fn test_union_is_ordered_and_deduplicated() {
        let directory = RoleDirectory::new();
        directory.upsert_role(Role::new(
            "r_editor",
            "Editor",
            vec!["pages:write".to_string(), "pages:read".to_string()],
        ));
        directory.upsert_role(Role::new(
            "r_viewer",
            "Viewer",
            vec!["pages:read".to_string(), "layout:read".to_string()],
        ));

        let user = user_with_roles(vec!["r_editor".into(), "r_viewer".into()]);
        let codes = directory.permissions_for(&user);
        assert_eq!(codes, vec!["layout:read", "pages:read", "pages:write"]);
    }

    #[test]
    fn test_disabled_role_excluded() {
        let directory = RoleDirectory::new();
        let mut role = Role::new("r_admin", "Admin", vec!["users:write".to_string()]);
        role.enabled = false;
        directory.upsert_role(role);

        let user = user_with_roles(vec!["r_admin".into()]);
        assert!(directory.permissions_for(&user).is_empty());
    }

    #[test]
    fn test_unknown_role_ignored() {
        let directory = RoleDirectory::new();
        let user = user_with_roles(vec!["r_ghost".into()]);
        assert!(directory.permissions_for(&user).is_empty());
    }
}
