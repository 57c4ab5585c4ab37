//! Role-based permission evaluation over a user's role assignments.

use std::collections::BTreeSet;

use crate::{ObjectRef, Permission, PermissionTable, RoleAssignment};

/// Returns whether any assignment grants `permission` for the optional target.
///
/// An assignment grants the permission when its role kind confers it in
/// `table` and its scope covers `target`: global assignments cover everything,
/// scoped assignments only the exact object they name.
#[must_use]
pub fn has_permission(
    table: &PermissionTable,
    assignments: &[RoleAssignment],
    permission: Permission,
    target: Option<&ObjectRef>,
) -> bool {
    assignments.iter().any(|assignment| {
        table.grants(assignment.role_kind(), permission) && assignment.covers(target)
    })
}

/// Returns every permission conferred by the global assignments.
#[must_use]
pub fn granted_permissions(
    table: &PermissionTable,
    assignments: &[RoleAssignment],
) -> BTreeSet<Permission> {
    assignments
        .iter()
        .filter(|assignment| assignment.scope().is_global())
        .flat_map(move |assignment| {
            table
                .permissions_for(assignment.role_kind())
                .iter()
                .copied()
        })
        .collect()
}
