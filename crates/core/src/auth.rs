use serde::{Deserialize, Serialize};

use crate::UserId;

/// Profile of the authenticated user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    user_id: UserId,
    display_name: Option<String>,
    email: Option<String>,
}

impl CurrentUser {
    /// Creates a current-user record.
    #[must_use]
    pub fn new(user_id: UserId, display_name: Option<String>, email: Option<String>) -> Self {
        Self {
            user_id,
            display_name,
            email,
        }
    }

    /// Returns the backend identifier of the user.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the display name, if the profile carries one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the email, if the profile carries one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
