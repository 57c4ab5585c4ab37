//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod permission_table;
pub mod rbac;
mod role_assignment;
mod security;

pub use permission_table::{PermissionTable, PermissionTableVariant};
pub use rbac::{granted_permissions, has_permission};
pub use role_assignment::{ObjectRef, RoleAssignment, RoleAssignmentId, RoleScope};
pub use security::{Permission, RoleKind};
