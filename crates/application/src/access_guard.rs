use eventgate_domain::{Permission, RoleKind};

use crate::{RoleContext, RoleContextStatus};

/// Outcome of an access guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Role data is still loading; render nothing yet.
    Pending,
    /// The guarded surface may be shown.
    Granted,
    /// The guarded surface must be replaced by the fallback.
    Denied,
}

impl AccessDecision {
    /// Returns a stable label for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

/// Role and permission requirements guarding one surface.
///
/// Roles are alternatives (any one suffices); permissions are all required.
/// An empty list imposes no requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRequirement {
    allowed_roles: Vec<RoleKind>,
    permissions: Vec<Permission>,
}

impl AccessRequirement {
    /// Creates a requirement that admits every ready context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits holders of any of these role kinds.
    #[must_use]
    pub fn with_allowed_roles(mut self, roles: impl IntoIterator<Item = RoleKind>) -> Self {
        self.allowed_roles.extend(roles);
        self
    }

    /// Requires every one of these permissions.
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    /// Evaluates the requirement against a role context.
    #[must_use]
    pub fn evaluate(&self, context: &RoleContext) -> AccessDecision {
        match context.status() {
            RoleContextStatus::Loading => return AccessDecision::Pending,
            RoleContextStatus::SignedOut | RoleContextStatus::Failed => {
                return AccessDecision::Denied;
            }
            RoleContextStatus::Ready => {}
        }

        let role_check = self.allowed_roles.is_empty()
            || self
                .allowed_roles
                .iter()
                .any(|role_kind| context.has_role(*role_kind));
        let permission_check = self
            .permissions
            .iter()
            .all(|permission| context.check_permission(*permission, None));

        if role_check && permission_check {
            AccessDecision::Granted
        } else {
            AccessDecision::Denied
        }
    }
}
