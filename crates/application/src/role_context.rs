use std::sync::Arc;

use eventgate_core::{CurrentUser, UserId};
use eventgate_domain::{
    ObjectRef, Permission, PermissionTable, RoleAssignment, RoleKind, has_permission,
};

/// Progress of one external fetch feeding the role context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceState<T> {
    /// Not resolved yet.
    Pending,
    /// Resolved with a value.
    Ready(T),
    /// Rejected with a diagnostic message.
    Failed(String),
}

/// Lifecycle state of a role context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleContextStatus {
    /// Role data is not available yet.
    Loading,
    /// Role data resolved for the current user.
    Ready,
    /// No user is logged in; nothing will be fetched.
    SignedOut,
    /// A role data source failed.
    Failed,
}

impl RoleContextStatus {
    /// Returns a stable label for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::SignedOut => "signed_out",
            Self::Failed => "failed",
        }
    }
}

/// Immutable snapshot of the current user's roles.
///
/// Every query denies unless the snapshot is ready.
#[derive(Debug, Clone)]
pub struct RoleContext {
    table: Arc<PermissionTable>,
    status: RoleContextStatus,
    user_id: Option<UserId>,
    roles: Vec<RoleAssignment>,
    failure: Option<String>,
}

impl RoleContext {
    /// Creates a context with no role data.
    #[must_use]
    pub fn loading(table: Arc<PermissionTable>) -> Self {
        Self {
            table,
            status: RoleContextStatus::Loading,
            user_id: None,
            roles: Vec::new(),
            failure: None,
        }
    }

    /// Creates a context for a session without a logged-in user.
    #[must_use]
    pub fn signed_out(table: Arc<PermissionTable>) -> Self {
        Self {
            status: RoleContextStatus::SignedOut,
            ..Self::loading(table)
        }
    }

    /// Derives a context from the latest state of both sources.
    ///
    /// A failure of either source wins over pending state. Roles are kept only
    /// when both sources resolved, and only those held by the current user.
    #[must_use]
    pub fn derive(
        table: Arc<PermissionTable>,
        current_user: &SourceState<CurrentUser>,
        assignments: &SourceState<Vec<RoleAssignment>>,
    ) -> Self {
        let failures: Vec<&str> = [failure_of(current_user), failure_of(assignments)]
            .into_iter()
            .flatten()
            .collect();
        if !failures.is_empty() {
            return Self {
                failure: Some(failures.join("; ")),
                status: RoleContextStatus::Failed,
                ..Self::loading(table)
            };
        }

        match (current_user, assignments) {
            (SourceState::Ready(user), SourceState::Ready(assignments)) => {
                let user_id = user.user_id();
                Self {
                    table,
                    status: RoleContextStatus::Ready,
                    user_id: Some(user_id),
                    roles: assignments
                        .iter()
                        .filter(|assignment| assignment.user_id() == user_id)
                        .cloned()
                        .collect(),
                    failure: None,
                }
            }
            _ => Self::loading(table),
        }
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn status(&self) -> RoleContextStatus {
        self.status
    }

    /// Returns whether role data is still loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == RoleContextStatus::Loading
    }

    /// Returns the user the roles were filtered for.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Returns the failure reported by a source, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Returns the permission table decisions are made against.
    #[must_use]
    pub fn permission_table(&self) -> &PermissionTable {
        &self.table
    }

    /// Returns the current user's role assignments.
    #[must_use]
    pub fn roles(&self) -> &[RoleAssignment] {
        &self.roles
    }

    /// Returns whether the user holds the role kind in any scope.
    #[must_use]
    pub fn has_role(&self, role_kind: RoleKind) -> bool {
        self.roles
            .iter()
            .any(|assignment| assignment.role_kind() == role_kind)
    }

    /// Returns every held assignment of the role kind.
    #[must_use]
    pub fn roles_of_type(&self, role_kind: RoleKind) -> Vec<&RoleAssignment> {
        self.roles
            .iter()
            .filter(|assignment| assignment.role_kind() == role_kind)
            .collect()
    }

    /// Returns the first assignment of the role kind scoped to exactly this object.
    ///
    /// Global assignments never match.
    #[must_use]
    pub fn role_for_object(
        &self,
        role_kind: RoleKind,
        target_id: i64,
        target_type: &str,
    ) -> Option<&RoleAssignment> {
        self.roles.iter().find(|assignment| {
            assignment.role_kind() == role_kind
                && assignment
                    .scope()
                    .object()
                    .is_some_and(|object| object.is(target_type, target_id))
        })
    }

    /// Evaluates the permission against the held roles.
    #[must_use]
    pub fn has_permission(&self, permission: Permission, target: Option<&ObjectRef>) -> bool {
        has_permission(&self.table, &self.roles, permission, target)
    }

    /// Evaluates the permission, denying until the context is ready.
    #[must_use]
    pub fn check_permission(&self, permission: Permission, target: Option<&ObjectRef>) -> bool {
        self.status == RoleContextStatus::Ready && self.has_permission(permission, target)
    }
}

fn failure_of<T>(state: &SourceState<T>) -> Option<&str> {
    match state {
        SourceState::Failed(message) => Some(message.as_str()),
        SourceState::Pending | SourceState::Ready(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eventgate_core::{CurrentUser, UserId};
    use eventgate_domain::{
        ObjectRef, Permission, PermissionTable, RoleAssignment, RoleAssignmentId, RoleKind,
    };

    use super::{RoleContext, RoleContextStatus, SourceState};

    fn table() -> Arc<PermissionTable> {
        Arc::new(PermissionTable::standard().clone())
    }

    fn user(id: i64) -> SourceState<CurrentUser> {
        SourceState::Ready(CurrentUser::new(UserId::new(id), None, None))
    }

    fn assignments() -> Vec<RoleAssignment> {
        vec![
            RoleAssignment::global(RoleAssignmentId::new(1), RoleKind::Organizer, UserId::new(1)),
            RoleAssignment::scoped(
                RoleAssignmentId::new(2),
                RoleKind::Curator,
                ObjectRef::new("project", 5),
                UserId::new(1),
            ),
            RoleAssignment::global(RoleAssignmentId::new(3), RoleKind::Admin, UserId::new(2)),
            RoleAssignment::global(RoleAssignmentId::new(4), RoleKind::Curator, UserId::new(1)),
        ]
    }

    #[test]
    fn loading_context_denies_everything() {
        let context = RoleContext::derive(
            table(),
            &SourceState::Pending,
            &SourceState::Ready(assignments()),
        );

        assert!(context.is_loading());
        assert!(context.roles().is_empty());
        for role_kind in RoleKind::all() {
            assert!(!context.has_role(*role_kind));
        }
        for permission in Permission::all() {
            assert!(!context.check_permission(*permission, None));
        }
    }

    #[test]
    fn ready_context_keeps_only_current_user_roles() {
        let context = RoleContext::derive(table(), &user(1), &SourceState::Ready(assignments()));

        assert_eq!(context.status(), RoleContextStatus::Ready);
        assert_eq!(context.user_id(), Some(UserId::new(1)));
        assert_eq!(context.roles().len(), 3);
        assert!(
            context
                .roles()
                .iter()
                .all(|assignment| assignment.user_id() == UserId::new(1))
        );
        assert!(!context.has_role(RoleKind::Admin));
        assert!(context.has_role(RoleKind::Organizer));
        assert_eq!(context.roles_of_type(RoleKind::Curator).len(), 2);
    }

    #[test]
    fn role_for_object_requires_exact_scope() {
        let context = RoleContext::derive(table(), &user(1), &SourceState::Ready(assignments()));

        let found = context.role_for_object(RoleKind::Curator, 5, "project");
        assert_eq!(found.map(RoleAssignment::id), Some(RoleAssignmentId::new(2)));
        assert!(context.role_for_object(RoleKind::Curator, 5, "event").is_none());
        assert!(context.role_for_object(RoleKind::Curator, 6, "project").is_none());
        assert!(
            context
                .role_for_object(RoleKind::Organizer, 5, "project")
                .is_none()
        );
    }

    #[test]
    fn signed_out_context_is_settled_and_denies_everything() {
        let context = RoleContext::signed_out(table());

        assert_eq!(context.status(), RoleContextStatus::SignedOut);
        assert!(!context.is_loading());
        assert!(context.roles().is_empty());
        assert!(context.user_id().is_none());
        for permission in Permission::all() {
            assert!(!context.check_permission(*permission, None));
            assert!(!context.has_permission(*permission, None));
        }
    }

    #[test]
    fn failed_source_denies_and_keeps_message() {
        let context = RoleContext::derive(
            table(),
            &user(1),
            &SourceState::Failed("role list: connection refused".to_owned()),
        );

        assert_eq!(context.status(), RoleContextStatus::Failed);
        assert_eq!(context.failure(), Some("role list: connection refused"));
        assert!(context.roles().is_empty());
        assert!(!context.check_permission(Permission::EditEvent, None));
    }

    #[test]
    fn check_permission_respects_object_scope() {
        let context = RoleContext::derive(table(), &user(1), &SourceState::Ready(assignments()));

        assert!(context.check_permission(Permission::CreateEvent, None));
        assert!(context.check_permission(
            Permission::EditProject,
            Some(&ObjectRef::new("project", 99))
        ));
        assert!(!context.check_permission(Permission::ManageRoles, None));
    }
}
