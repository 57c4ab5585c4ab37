use async_trait::async_trait;
use eventgate_application::RoleAssignmentSource;
use eventgate_core::{AppError, AppResult, UserId};
use eventgate_domain::{ObjectRef, RoleAssignment, RoleAssignmentId, RoleKind};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::HttpApiClient;

const ROLE_ENDPOINT: &str = "/api/role/";

#[derive(Debug, Deserialize)]
struct RoleAssignmentPage {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    next: Option<String>,
    results: Vec<RoleAssignmentRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct RoleAssignmentRow {
    id: i64,
    role_type: RoleKind,
    content_type: Option<String>,
    object_id: Option<i64>,
    user: i64,
}

/// HTTP adapter listing role assignments from the paginated role endpoint.
pub struct HttpRoleAssignmentSource {
    client: HttpApiClient,
    page_limit: usize,
}

impl HttpRoleAssignmentSource {
    /// Creates a source following at most `page_limit` pages.
    #[must_use]
    pub fn new(client: HttpApiClient, page_limit: usize) -> Self {
        Self {
            client,
            page_limit: page_limit.max(1),
        }
    }
}

#[async_trait]
impl RoleAssignmentSource for HttpRoleAssignmentSource {
    async fn list_role_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        let mut url = self.client.endpoint(ROLE_ENDPOINT)?;
        let mut assignments = Vec::new();
        let mut pages = 0_usize;

        loop {
            let page = self.client.get_json::<RoleAssignmentPage>(url).await?;
            pages = pages.saturating_add(1);
            assignments.extend(page.results.into_iter().filter_map(into_assignment));

            let Some(next) = page.next.filter(|next| !next.trim().is_empty()) else {
                break;
            };
            if pages >= self.page_limit {
                return Err(AppError::Internal(format!(
                    "role listing exceeded {} pages (reported count {:?})",
                    self.page_limit, page.count
                )));
            }
            url = self.client.endpoint(next.as_str())?;
        }

        debug!(
            pages,
            assignment_count = assignments.len(),
            "loaded role assignments"
        );

        Ok(assignments)
    }
}

fn into_assignment(row: RoleAssignmentRow) -> Option<RoleAssignment> {
    let id = RoleAssignmentId::new(row.id);
    let user_id = UserId::new(row.user);

    match (row.object_id, row.content_type) {
        (None, _) => Some(RoleAssignment::global(id, row.role_type, user_id)),
        (Some(object_id), Some(content_type)) if !content_type.trim().is_empty() => {
            Some(RoleAssignment::scoped(
                id,
                row.role_type,
                ObjectRef::new(content_type, object_id),
                user_id,
            ))
        }
        (Some(object_id), _) => {
            warn!(
                assignment_id = row.id,
                object_id,
                "skipping role assignment scoped to an object without content type"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eventgate_application::RoleAssignmentSource;
    use eventgate_core::{AppError, UserId};
    use eventgate_domain::{ObjectRef, RoleKind, RoleScope};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{HttpRoleAssignmentSource, RoleAssignmentPage, into_assignment};
    use crate::{HttpApiClient, InMemorySessionTokenStore};

    fn source(base_url: &str, page_limit: usize) -> Option<HttpRoleAssignmentSource> {
        HttpApiClient::new(
            reqwest::Client::new(),
            base_url,
            Arc::new(InMemorySessionTokenStore::with_token("secret")),
        )
        .ok()
        .map(|client| HttpRoleAssignmentSource::new(client, page_limit))
    }

    async fn mount_two_pages(mock_server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/role/"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": null,
                "previous": format!("{}/api/role/", mock_server.uri()),
                "results": [
                    {"id": 2, "role_type": "curator", "content_type": "project", "object_id": 9, "user": 4}
                ]
            })))
            .with_priority(1)
            .mount(mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/role/"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": format!("{}/api/role/?page=2", mock_server.uri()),
                "previous": null,
                "results": [
                    {"id": 1, "role_type": "organizer", "content_type": null, "object_id": null, "user": 4}
                ]
            })))
            .expect(1)
            .mount(mock_server)
            .await;
    }

    const PAGE: &str = r#"{
        "count": 3,
        "next": "http://127.0.0.1:8000/api/role/?page=2",
        "previous": null,
        "results": [
            {"id": 1, "role_type": "organizer", "content_type": null, "object_id": null, "user": 4},
            {"id": 2, "role_type": "curator", "content_type": "project", "object_id": 9, "user": 4},
            {"id": 3, "role_type": "direction_leader", "content_type": null, "object_id": 2, "user": 5}
        ]
    }"#;

    #[test]
    fn page_rows_convert_to_assignments() {
        let page = serde_json::from_str::<RoleAssignmentPage>(PAGE);
        assert!(page.is_ok());
        let Ok(page) = page else {
            return;
        };
        assert!(page.next.is_some());

        let assignments: Vec<_> = page.results.into_iter().filter_map(into_assignment).collect();
        assert_eq!(assignments.len(), 2);

        assert_eq!(assignments[0].role_kind(), RoleKind::Organizer);
        assert_eq!(assignments[0].scope(), &RoleScope::Global);
        assert_eq!(assignments[0].user_id(), UserId::new(4));

        assert_eq!(
            assignments[1].scope().object(),
            Some(&ObjectRef::new("project", 9))
        );
    }

    #[test]
    fn unknown_role_type_fails_the_page() {
        let page = serde_json::from_str::<RoleAssignmentPage>(
            r#"{"results": [{"id": 1, "role_type": "owner", "content_type": null, "object_id": null, "user": 1}]}"#,
        );
        assert!(page.is_err());
    }

    #[tokio::test]
    async fn listing_follows_next_links_across_pages() {
        let mock_server = MockServer::start().await;
        mount_two_pages(&mock_server).await;
        let Some(source) = source(mock_server.uri().as_str(), 5) else {
            panic!("client should build for the mock server");
        };

        let assignments = source.list_role_assignments().await;

        assert!(assignments.is_ok());
        let Ok(assignments) = assignments else {
            return;
        };
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].role_kind(), RoleKind::Organizer);
        assert_eq!(assignments[0].scope(), &RoleScope::Global);
        assert_eq!(assignments[1].role_kind(), RoleKind::Curator);
        assert_eq!(
            assignments[1].scope().object(),
            Some(&ObjectRef::new("project", 9))
        );
    }

    #[tokio::test]
    async fn listing_longer_than_page_limit_fails() {
        let mock_server = MockServer::start().await;
        mount_two_pages(&mock_server).await;
        let Some(source) = source(mock_server.uri().as_str(), 1) else {
            panic!("client should build for the mock server");
        };

        let result = source.list_role_assignments().await;

        assert!(matches!(
            result,
            Err(AppError::Internal(message)) if message.contains("exceeded 1 pages")
        ));
    }

    #[tokio::test]
    async fn rejected_token_fails_with_unauthorized() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/role/"))
            .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
            .mount(&mock_server)
            .await;
        let Some(source) = source(mock_server.uri().as_str(), 5) else {
            panic!("client should build for the mock server");
        };

        let result = source.list_role_assignments().await;

        assert!(matches!(
            result,
            Err(AppError::Unauthorized(message)) if message.contains("token expired")
        ));
    }
}
