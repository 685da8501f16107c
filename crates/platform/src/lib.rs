//! Platform capabilities: multi-tenancy (site lifecycle and per-site
//! feature selections) and role-based access control.

pub mod rbac;
pub mod tenancy;

pub use rbac::{Permission, Role, RoleAssignments};
pub use tenancy::SiteManager;
