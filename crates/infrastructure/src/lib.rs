//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_api_client;
mod http_current_user_source;
mod http_role_assignment_source;
mod in_memory_role_sources;
mod in_memory_session_token_store;

pub use http_api_client::HttpApiClient;
pub use http_current_user_source::HttpCurrentUserSource;
pub use http_role_assignment_source::HttpRoleAssignmentSource;
pub use in_memory_role_sources::{InMemoryCurrentUserSource, InMemoryRoleAssignmentSource};
pub use in_memory_session_token_store::InMemorySessionTokenStore;
