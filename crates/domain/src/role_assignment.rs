use std::fmt::{Display, Formatter};

use eventgate_core::UserId;
use serde::{Deserialize, Serialize};

use crate::RoleKind;

/// Backend identifier of a role assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleAssignmentId(i64);

impl RoleAssignmentId {
    /// Creates an assignment identifier from its backend value.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the backend value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for RoleAssignmentId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Reference to one platform object, such as an event or a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Content type name of the object.
    pub target_type: String,
    /// Backend identifier of the object.
    pub target_id: i64,
}

impl ObjectRef {
    /// Creates an object reference.
    #[must_use]
    pub fn new(target_type: impl Into<String>, target_id: i64) -> Self {
        Self {
            target_type: target_type.into(),
            target_id,
        }
    }

    /// Returns whether this reference names the given object.
    #[must_use]
    pub fn is(&self, target_type: &str, target_id: i64) -> bool {
        self.target_id == target_id && self.target_type == target_type
    }
}

impl Display for ObjectRef {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}:{}", self.target_type, self.target_id)
    }
}

/// Where a role assignment applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleScope {
    /// Applies to every object.
    Global,
    /// Applies to exactly one object.
    Object(ObjectRef),
}

impl RoleScope {
    /// Returns the scoped object, if any.
    #[must_use]
    pub fn object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Global => None,
            Self::Object(object) => Some(object),
        }
    }

    /// Returns whether the scope is global.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

/// One role held by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    id: RoleAssignmentId,
    role_kind: RoleKind,
    scope: RoleScope,
    user_id: UserId,
}

impl RoleAssignment {
    /// Creates a role assignment that applies everywhere.
    #[must_use]
    pub fn global(id: RoleAssignmentId, role_kind: RoleKind, user_id: UserId) -> Self {
        Self {
            id,
            role_kind,
            scope: RoleScope::Global,
            user_id,
        }
    }

    /// Creates a role assignment restricted to one object.
    #[must_use]
    pub fn scoped(
        id: RoleAssignmentId,
        role_kind: RoleKind,
        object: ObjectRef,
        user_id: UserId,
    ) -> Self {
        Self {
            id,
            role_kind,
            scope: RoleScope::Object(object),
            user_id,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub fn id(&self) -> RoleAssignmentId {
        self.id
    }

    /// Returns the role kind.
    #[must_use]
    pub fn role_kind(&self) -> RoleKind {
        self.role_kind
    }

    /// Returns the scope.
    #[must_use]
    pub fn scope(&self) -> &RoleScope {
        &self.scope
    }

    /// Returns the user holding this assignment.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns whether the assignment covers the optional target object.
    ///
    /// Global assignments cover every target. Scoped assignments cover only the
    /// exact object they name and never a missing target.
    #[must_use]
    pub fn covers(&self, target: Option<&ObjectRef>) -> bool {
        match (&self.scope, target) {
            (RoleScope::Global, _) => true,
            (RoleScope::Object(object), Some(target)) => object == target,
            (RoleScope::Object(_), None) => false,
        }
    }
}
