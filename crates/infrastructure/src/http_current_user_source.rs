use async_trait::async_trait;
use eventgate_application::CurrentUserSource;
use eventgate_core::{AppResult, CurrentUser, UserId};
use serde::Deserialize;

use crate::HttpApiClient;

const PROFILE_ENDPOINT: &str = "/api/profile/";

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    user_id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    surname: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl ProfileResponse {
    fn into_current_user(self) -> CurrentUser {
        let display_name = match (self.name, self.surname) {
            (Some(name), Some(surname)) => Some(format!("{name} {surname}")),
            (name, surname) => name.or(surname),
        }
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty());

        CurrentUser::new(UserId::new(self.user_id), display_name, self.email)
    }
}

/// HTTP adapter reading the authenticated user's profile.
pub struct HttpCurrentUserSource {
    client: HttpApiClient,
}

impl HttpCurrentUserSource {
    /// Creates a source backed by the profile endpoint.
    #[must_use]
    pub fn new(client: HttpApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CurrentUserSource for HttpCurrentUserSource {
    async fn current_user(&self) -> AppResult<CurrentUser> {
        let url = self.client.endpoint(PROFILE_ENDPOINT)?;
        let profile = self.client.get_json::<ProfileResponse>(url).await?;
        Ok(profile.into_current_user())
    }
}
