//! Eventgate access probe: resolves the session's roles and reports permission decisions.

#![forbid(unsafe_code)]

mod probe_config;

use std::sync::Arc;
use std::time::Duration;

use eventgate_application::{AccessRequirement, RoleContextProvider, RoleContextSources};
use eventgate_core::{AppError, AppResult};
use eventgate_domain::{PermissionTable, RoleKind, granted_permissions};
use eventgate_infrastructure::{
    HttpApiClient, HttpCurrentUserSource, HttpRoleAssignmentSource, InMemorySessionTokenStore,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::probe_config::ProbeConfig;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ProbeConfig::load()?;
    let provider = build_provider(&config)?;

    info!(
        api_base_url = %config.api_base_url,
        permission_table = %config.permission_table,
        logged_in = config.access_token.is_some(),
        "eventgate-probe started"
    );

    let context = provider.refresh().await;
    if let Some(failure) = context.failure() {
        warn!(failure, "role data unavailable, every permission is denied");
    }

    let roles: Vec<String> = context
        .roles()
        .iter()
        .map(|assignment| match assignment.scope().object() {
            Some(object) => format!("{}@{object}", assignment.role_kind()),
            None => assignment.role_kind().to_string(),
        })
        .collect();
    info!(
        status = context.status().as_str(),
        user_id = ?context.user_id(),
        roles = ?roles,
        "resolved role context"
    );

    let global: Vec<&str> = granted_permissions(context.permission_table(), context.roles())
        .into_iter()
        .map(|permission| permission.as_str())
        .collect();
    info!(permissions = ?global, "permissions granted by global roles");

    let target = config.target.as_ref().map(ToString::to_string);
    for permission in &config.permissions {
        let allowed = context.check_permission(*permission, config.target.as_ref());
        info!(
            permission = permission.as_str(),
            target = ?target,
            allowed,
            "permission decision"
        );
    }

    let admin_surface = AccessRequirement::new().with_allowed_roles([RoleKind::Admin]);
    let decision = admin_surface.evaluate(&context);
    info!(admin_surface = decision.as_str(), "access guard decision");

    Ok(())
}

fn build_provider(config: &ProbeConfig) -> AppResult<RoleContextProvider> {
    let session = Arc::new(match &config.access_token {
        Some(token) => InMemorySessionTokenStore::with_token(token.as_str()),
        None => InMemorySessionTokenStore::new(),
    });
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
    let api_client = HttpApiClient::new(
        http_client,
        config.api_base_url.as_str(),
        session.clone(),
    )?;

    let sources = RoleContextSources {
        assignments: Arc::new(HttpRoleAssignmentSource::new(
            api_client.clone(),
            config.role_page_limit,
        )),
        current_user: Arc::new(HttpCurrentUserSource::new(api_client)),
        session,
    };
    let table = Arc::new(PermissionTable::for_variant(config.permission_table).clone());

    Ok(RoleContextProvider::new(sources, table))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
