use std::env;
use std::str::FromStr;

use eventgate_core::{AppError, AppResult};
use eventgate_domain::{ObjectRef, Permission, PermissionTableVariant};

/// Runtime configuration for the access probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub api_base_url: String,
    pub access_token: Option<String>,
    pub permission_table: PermissionTableVariant,
    pub http_timeout_secs: u64,
    pub role_page_limit: usize,
    pub permissions: Vec<Permission>,
    pub target: Option<ObjectRef>,
}

impl ProbeConfig {
    pub fn load() -> AppResult<Self> {
        let api_base_url = env::var("EVENTGATE_API_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_owned())
            .trim_end_matches('/')
            .to_owned();
        let access_token = env::var("EVENTGATE_ACCESS_TOKEN")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        let permission_table = match env::var("EVENTGATE_PERMISSION_TABLE") {
            Ok(value) => PermissionTableVariant::from_str(value.as_str())?,
            Err(_) => PermissionTableVariant::default(),
        };
        let http_timeout_secs = parse_env_u64("EVENTGATE_HTTP_TIMEOUT_SECS", 15)?;
        let role_page_limit = parse_env_usize("EVENTGATE_ROLE_PAGE_LIMIT", 20)?;
        let permissions = parse_permissions(
            env::var("EVENTGATE_PROBE_PERMISSIONS")
                .unwrap_or_default()
                .as_str(),
        )?;
        let target = env::var("EVENTGATE_PROBE_TARGET")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_target(value.as_str()))
            .transpose()?;

        if http_timeout_secs == 0 {
            return Err(AppError::Validation(
                "EVENTGATE_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        if role_page_limit == 0 {
            return Err(AppError::Validation(
                "EVENTGATE_ROLE_PAGE_LIMIT must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            api_base_url,
            access_token,
            permission_table,
            http_timeout_secs,
            role_page_limit,
            permissions,
            target,
        })
    }
}

/// Parses a comma-separated permission list; an empty value checks every permission.
fn parse_permissions(value: &str) -> AppResult<Vec<Permission>> {
    let permissions = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(Permission::from_str)
        .collect::<AppResult<Vec<_>>>()?;

    if permissions.is_empty() {
        return Ok(Permission::all().to_vec());
    }

    Ok(permissions)
}

fn parse_target(value: &str) -> AppResult<ObjectRef> {
    let invalid = || {
        AppError::Validation(format!(
            "invalid EVENTGATE_PROBE_TARGET value '{value}', expected 'target_type:target_id'"
        ))
    };

    let (target_type, target_id) = value.trim().rsplit_once(':').ok_or_else(invalid)?;
    let target_type = target_type.trim();
    if target_type.is_empty() {
        return Err(invalid());
    }
    let target_id = target_id.trim().parse::<i64>().map_err(|_| invalid())?;

    Ok(ObjectRef::new(target_type, target_id))
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> AppResult<usize> {
    match env::var(name) {
        Ok(value) => value.parse::<usize>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use eventgate_domain::{ObjectRef, Permission};

    use super::{parse_permissions, parse_target};

    #[test]
    fn permission_list_is_parsed_in_order() {
        let permissions = parse_permissions(" edit_event, ,manage_roles ");
        assert_eq!(
            permissions.ok(),
            Some(vec![Permission::EditEvent, Permission::ManageRoles])
        );
    }

    #[test]
    fn empty_permission_list_means_all() {
        let permissions = parse_permissions("");
        assert_eq!(permissions.ok(), Some(Permission::all().to_vec()));
    }

    #[test]
    fn unknown_permission_is_rejected() {
        assert!(parse_permissions("edit_event,fly").is_err());
    }

    #[test]
    fn target_is_parsed_from_type_and_id() {
        assert_eq!(
            parse_target("project:42").ok(),
            Some(ObjectRef::new("project", 42))
        );
        assert!(parse_target("project").is_err());
        assert!(parse_target(":4").is_err());
        assert!(parse_target("event:abc").is_err());
    }
}
