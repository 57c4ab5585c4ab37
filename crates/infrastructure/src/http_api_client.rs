use std::sync::Arc;

use eventgate_application::SessionTokenStore;
use eventgate_core::{AppError, AppResult};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

/// Authenticated JSON client for the platform REST API.
#[derive(Clone)]
pub struct HttpApiClient {
    http_client: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionTokenStore>,
}

impl HttpApiClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(
        http_client: reqwest::Client,
        base_url: &str,
        session: Arc<dyn SessionTokenStore>,
    ) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|error| {
            AppError::Validation(format!("invalid API base URL '{base_url}': {error}"))
        })?;

        Ok(Self {
            http_client,
            base_url,
            session,
        })
    }

    /// Resolves an API path or absolute link against the base URL.
    pub fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url.join(path).map_err(|error| {
            AppError::Validation(format!("invalid API endpoint '{path}': {error}"))
        })
    }

    /// Issues a GET request and decodes the JSON body.
    pub async fn get_json<T>(&self, url: Url) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let mut request = self.http_client.get(url.clone());
        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|error| {
            AppError::Internal(format!("failed to call '{url}': {error}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(status_error(&url, status, body.as_str()));
        }

        response.json::<T>().await.map_err(|error| {
            AppError::Internal(format!("failed to parse response body from '{url}': {error}"))
        })
    }
}

fn status_error(url: &Url, status: StatusCode, body: &str) -> AppError {
    let message = format!("'{url}' returned status {}: {body}", status.as_u16());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Internal(message),
    }
}
