use async_trait::async_trait;
use eventgate_application::{CurrentUserSource, RoleAssignmentSource};
use eventgate_core::{AppError, AppResult, CurrentUser};
use eventgate_domain::RoleAssignment;
use tokio::sync::RwLock;

/// In-process role assignment list.
#[derive(Default)]
pub struct InMemoryRoleAssignmentSource {
    assignments: RwLock<Vec<RoleAssignment>>,
}

impl InMemoryRoleAssignmentSource {
    /// Creates a source serving `assignments`.
    #[must_use]
    pub fn new(assignments: Vec<RoleAssignment>) -> Self {
        Self {
            assignments: RwLock::new(assignments),
        }
    }

    /// Replaces the served assignments.
    pub async fn replace(&self, assignments: Vec<RoleAssignment>) {
        *self.assignments.write().await = assignments;
    }
}

#[async_trait]
impl RoleAssignmentSource for InMemoryRoleAssignmentSource {
    async fn list_role_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        Ok(self.assignments.read().await.clone())
    }
}

/// In-process current-user record.
#[derive(Default)]
pub struct InMemoryCurrentUserSource {
    user: RwLock<Option<CurrentUser>>,
}

impl InMemoryCurrentUserSource {
    /// Creates a source serving `user`.
    #[must_use]
    pub fn new(user: CurrentUser) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    /// Replaces the served user; `None` simulates a logged-out profile.
    pub async fn replace(&self, user: Option<CurrentUser>) {
        *self.user.write().await = user;
    }
}

#[async_trait]
impl CurrentUserSource for InMemoryCurrentUserSource {
    async fn current_user(&self) -> AppResult<CurrentUser> {
        self.user
            .read()
            .await
            .clone()
            .ok_or_else(|| AppError::Unauthorized("no authenticated user".to_owned()))
    }
}
