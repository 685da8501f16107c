//! Role-based access control: fixed role levels with static permission
//! grants, assigned per user per site. Super-admins hold every permission on
//! every site.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Fine-grained permission for admin surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    SiteRead,
    CatalogRead,
    CatalogWrite,
    BookingsRead,
    BookingsWrite,
    ContentWrite,
    SettingsWrite,
    UserManage,
    PackageAssign,
}

/// Role level held by a user on a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Editor,
}

impl Role {
    /// Static permission grant for each role.
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Self::SuperAdmin => &[
                Permission::SiteRead,
                Permission::CatalogRead,
                Permission::CatalogWrite,
                Permission::BookingsRead,
                Permission::BookingsWrite,
                Permission::ContentWrite,
                Permission::SettingsWrite,
                Permission::UserManage,
                Permission::PackageAssign,
            ],
            Self::Admin => &[
                Permission::SiteRead,
                Permission::CatalogRead,
                Permission::CatalogWrite,
                Permission::BookingsRead,
                Permission::BookingsWrite,
                Permission::ContentWrite,
                Permission::SettingsWrite,
                Permission::UserManage,
            ],
            Self::Editor => &[
                Permission::SiteRead,
                Permission::CatalogRead,
                Permission::CatalogWrite,
                Permission::BookingsRead,
                Permission::BookingsWrite,
                Permission::ContentWrite,
            ],
        }
    }

    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Editor => "editor",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_lowercase().as_str() {
            "super_admin" | "super-admin" | "superadmin" => Some(Self::SuperAdmin),
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-site role assignments, plus the cross-site super-admin set.
pub struct RoleAssignments {
    site_roles: DashMap<(Uuid, Uuid), Role>,
    super_admins: DashMap<Uuid, ()>,
}

impl Default for RoleAssignments {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleAssignments {
    pub fn new() -> Self {
        Self {
            site_roles: DashMap::new(),
            super_admins: DashMap::new(),
        }
    }

    /// Grant platform-wide super-admin standing.
    pub fn grant_super_admin(&self, user_id: Uuid) {
        self.super_admins.insert(user_id, ());
        info!(user_id = %user_id, "Super-admin granted");
    }

    pub fn is_super_admin(&self, user_id: Uuid) -> bool {
        self.super_admins.contains_key(&user_id)
    }

    /// Assign a role on a single site, replacing any previous one.
    pub fn assign(&self, user_id: Uuid, site_id: Uuid, role: Role) {
        self.site_roles.insert((user_id, site_id), role);
        info!(user_id = %user_id, site_id = %site_id, role = %role, "Role assigned");
    }

    /// Remove a user's role on a site. Returns `true` when one was removed.
    pub fn revoke(&self, user_id: Uuid, site_id: Uuid) -> bool {
        let removed = self.site_roles.remove(&(user_id, site_id)).is_some();
        if removed {
            info!(user_id = %user_id, site_id = %site_id, "Role revoked");
        }
        removed
    }

    /// The role a user holds on a site, super-admin standing included.
    pub fn role_of(&self, user_id: Uuid, site_id: Uuid) -> Option<Role> {
        if self.is_super_admin(user_id) {
            return Some(Role::SuperAdmin);
        }
        self.site_roles
            .get(&(user_id, site_id))
            .map(|e| *e.value())
    }

    /// Check whether a user holds a permission on a site.
    pub fn check(&self, user_id: Uuid, site_id: Uuid, permission: Permission) -> bool {
        self.role_of(user_id, site_id)
            .map(|role| role.grants(permission))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_grants() {
        assert!(Role::SuperAdmin.grants(Permission::PackageAssign));
        assert!(!Role::Admin.grants(Permission::PackageAssign));
        assert!(Role::Admin.grants(Permission::SettingsWrite));
        assert!(!Role::Editor.grants(Permission::SettingsWrite));
        assert!(Role::Editor.grants(Permission::CatalogWrite));
    }

    #[test]
    fn test_site_scoped_assignment() {
        let roles = RoleAssignments::new();
        let user = Uuid::new_v4();
        let site_a = Uuid::new_v4();
        let site_b = Uuid::new_v4();

        roles.assign(user, site_a, Role::Admin);
        assert_eq!(roles.role_of(user, site_a), Some(Role::Admin));
        assert_eq!(roles.role_of(user, site_b), None);
        assert!(roles.check(user, site_a, Permission::SettingsWrite));
        assert!(!roles.check(user, site_b, Permission::SettingsWrite));

        assert!(roles.revoke(user, site_a));
        assert!(!roles.revoke(user, site_a));
        assert!(!roles.check(user, site_a, Permission::SiteRead));
    }

    #[test]
    fn test_super_admin_spans_sites() {
        let roles = RoleAssignments::new();
        let user = Uuid::new_v4();
        roles.grant_super_admin(user);

        let any_site = Uuid::new_v4();
        assert_eq!(roles.role_of(user, any_site), Some(Role::SuperAdmin));
        assert!(roles.check(user, any_site, Permission::PackageAssign));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("super-admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("owner"), None);
    }
}
