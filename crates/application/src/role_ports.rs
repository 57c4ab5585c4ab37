use async_trait::async_trait;
use eventgate_core::{AppResult, CurrentUser};
use eventgate_domain::RoleAssignment;

/// Source of every role assignment visible to the session.
///
/// The list is not filtered by user; the role context does that.
#[async_trait]
pub trait RoleAssignmentSource: Send + Sync {
    /// Lists role assignments.
    async fn list_role_assignments(&self) -> AppResult<Vec<RoleAssignment>>;
}

/// Source of the authenticated user's profile.
#[async_trait]
pub trait CurrentUserSource: Send + Sync {
    /// Returns the current user.
    async fn current_user(&self) -> AppResult<CurrentUser>;
}

/// Holder of the session's access token.
pub trait SessionTokenStore: Send + Sync {
    /// Returns the access token while a user is logged in.
    fn access_token(&self) -> Option<String>;
}
