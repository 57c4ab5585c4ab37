use std::fmt::{Display, Formatter};
use std::str::FromStr;

use eventgate_core::AppError;
use serde::{Deserialize, Serialize};

/// Permissions checked by UI gating and route guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows granting and revoking roles.
    ManageRoles,
    /// Allows editing an event.
    EditEvent,
    /// Allows editing a direction.
    EditDirection,
    /// Allows editing a project.
    EditProject,
    /// Allows submitting an application to a project.
    SubmitApplication,
    /// Allows reviewing submitted applications.
    ViewApplications,
    /// Allows following the application review process.
    ViewApplicationProcess,
    /// Allows configuring notifications.
    SetupNotifications,
    /// Allows creating events.
    CreateEvent,
    /// Allows creating directions.
    CreateDirection,
    /// Allows creating projects.
    CreateProject,
    /// Allows editing the caller's own profile.
    EditOwnProfile,
}

impl Permission {
    /// Returns the stable transport value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManageRoles => "manage_roles",
            Self::EditEvent => "edit_event",
            Self::EditDirection => "edit_direction",
            Self::EditProject => "edit_project",
            Self::SubmitApplication => "submit_application",
            Self::ViewApplications => "view_applications",
            Self::ViewApplicationProcess => "view_application_process",
            Self::SetupNotifications => "setup_notifications",
            Self::CreateEvent => "create_event",
            Self::CreateDirection => "create_direction",
            Self::CreateProject => "create_project",
            Self::EditOwnProfile => "edit_own_profile",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ManageRoles,
            Permission::EditEvent,
            Permission::EditDirection,
            Permission::EditProject,
            Permission::SubmitApplication,
            Permission::ViewApplications,
            Permission::ViewApplicationProcess,
            Permission::SetupNotifications,
            Permission::CreateEvent,
            Permission::CreateDirection,
            Permission::CreateProject,
            Permission::EditOwnProfile,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Closed set of role kinds a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// Platform administrator.
    Admin,
    /// Event organizer.
    Organizer,
    /// Leader of a direction inside an event.
    DirectionLeader,
    /// Curator of a project.
    Curator,
    /// Participant working on projects.
    Projectant,
}

impl RoleKind {
    /// Returns the stable transport value for this role kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Organizer => "organizer",
            Self::DirectionLeader => "direction_leader",
            Self::Curator => "curator",
            Self::Projectant => "projectant",
        }
    }

    /// Returns all role kinds.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[RoleKind] = &[
            RoleKind::Admin,
            RoleKind::Organizer,
            RoleKind::DirectionLeader,
            RoleKind::Curator,
            RoleKind::Projectant,
        ];

        ALL
    }
}

impl FromStr for RoleKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "organizer" => Ok(Self::Organizer),
            "direction_leader" => Ok(Self::DirectionLeader),
            "curator" => Ok(Self::Curator),
            "projectant" => Ok(Self::Projectant),
            _ => Err(AppError::Validation(format!(
                "unknown role kind value '{value}'"
            ))),
        }
    }
}

impl Display for RoleKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Permission, RoleKind};

    #[test]
    fn permission_roundtrip_storage_value() {
        for permission in Permission::all() {
            let restored = Permission::from_str(permission.as_str());
            assert_eq!(restored.ok(), Some(*permission));
        }
    }

    #[test]
    fn unknown_permission_is_rejected() {
        let parsed = Permission::from_str("edit_everything");
        assert!(parsed.is_err());
    }

    #[test]
    fn serde_value_matches_transport_value() {
        let encoded = serde_json::to_string(&Permission::ViewApplicationProcess);
        assert_eq!(
            encoded.ok().as_deref(),
            Some("\"view_application_process\"")
        );

        let decoded = serde_json::from_str::<RoleKind>("\"direction_leader\"");
        assert_eq!(decoded.ok(), Some(RoleKind::DirectionLeader));
    }

    #[test]
    fn unknown_role_kind_is_rejected() {
        assert!(RoleKind::from_str("superuser").is_err());
        assert_eq!(RoleKind::from_str("curator").ok(), Some(RoleKind::Curator));
    }
}
