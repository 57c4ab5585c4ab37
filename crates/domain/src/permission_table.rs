use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use eventgate_core::AppError;
use serde::{Deserialize, Serialize};

use crate::{Permission, RoleKind};

static EMPTY: BTreeSet<Permission> = BTreeSet::new();

static STANDARD: LazyLock<PermissionTable> = LazyLock::new(|| {
    PermissionTable::from_entries([
        (RoleKind::Admin, vec![Permission::ManageRoles]),
        (
            RoleKind::Organizer,
            vec![
                Permission::EditEvent,
                Permission::EditDirection,
                Permission::EditProject,
                Permission::ViewApplications,
                Permission::SetupNotifications,
                Permission::CreateEvent,
                Permission::CreateDirection,
                Permission::CreateProject,
            ],
        ),
        (
            RoleKind::DirectionLeader,
            vec![
                Permission::EditDirection,
                Permission::CreateProject,
                Permission::EditProject,
            ],
        ),
        (RoleKind::Curator, vec![Permission::EditProject]),
        (RoleKind::Projectant, vec![Permission::SubmitApplication]),
    ])
});

static LEGACY: LazyLock<PermissionTable> = LazyLock::new(|| {
    PermissionTable::from_entries([
        (RoleKind::Admin, vec![Permission::ManageRoles]),
        (
            RoleKind::Organizer,
            vec![
                Permission::EditEvent,
                Permission::ManageRoles,
                Permission::ViewApplicationProcess,
                Permission::SetupNotifications,
            ],
        ),
        (
            RoleKind::DirectionLeader,
            vec![Permission::EditDirection, Permission::ViewApplicationProcess],
        ),
        (RoleKind::Curator, Vec::new()),
        (
            RoleKind::Projectant,
            vec![
                Permission::SubmitApplication,
                Permission::ViewApplicationProcess,
                Permission::EditOwnProfile,
            ],
        ),
    ])
});

/// Named permission table shipped with the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionTableVariant {
    /// Organizers create and edit events, directions and projects.
    #[default]
    Standard,
    /// Organizers manage roles and follow the application process instead.
    Legacy,
}

impl PermissionTableVariant {
    /// Returns the stable configuration value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Legacy => "legacy",
        }
    }
}

impl FromStr for PermissionTableVariant {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "legacy" => Ok(Self::Legacy),
            _ => Err(AppError::Validation(format!(
                "unknown permission table '{value}', expected 'standard' or 'legacy'"
            ))),
        }
    }
}

impl Display for PermissionTableVariant {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Immutable mapping from role kind to the permissions it confers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable {
    entries: BTreeMap<RoleKind, BTreeSet<Permission>>,
}

impl PermissionTable {
    /// Builds a table from `(role kind, permissions)` pairs.
    ///
    /// Repeated role kinds accumulate their permissions.
    #[must_use]
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (RoleKind, P)>,
        P: IntoIterator<Item = Permission>,
    {
        let mut table = BTreeMap::<RoleKind, BTreeSet<Permission>>::new();
        for (role_kind, permissions) in entries {
            table.entry(role_kind).or_default().extend(permissions);
        }

        Self { entries: table }
    }

    /// Returns the process-wide table for a shipped variant.
    #[must_use]
    pub fn for_variant(variant: PermissionTableVariant) -> &'static Self {
        match variant {
            PermissionTableVariant::Standard => &STANDARD,
            PermissionTableVariant::Legacy => &LEGACY,
        }
    }

    /// Returns the authoritative table.
    #[must_use]
    pub fn standard() -> &'static Self {
        Self::for_variant(PermissionTableVariant::Standard)
    }

    /// Returns the permissions conferred by a role kind.
    #[must_use]
    pub fn permissions_for(&self, role_kind: RoleKind) -> &BTreeSet<Permission> {
        self.entries.get(&role_kind).unwrap_or(&EMPTY)
    }

    /// Returns whether the role kind confers the permission.
    #[must_use]
    pub fn grants(&self, role_kind: RoleKind, permission: Permission) -> bool {
        self.permissions_for(role_kind).contains(&permission)
    }
}
