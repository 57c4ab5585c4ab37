//! Application services and ports.

#![forbid(unsafe_code)]

mod access_guard;
mod role_context;
mod role_context_provider;
mod role_context_scope;
mod role_ports;

pub use access_guard::{AccessDecision, AccessRequirement};
pub use role_context::{RoleContext, RoleContextStatus, SourceState};
pub use role_context_provider::{RoleContextProvider, RoleContextSources};
pub use role_context_scope::{current_role_context, with_role_context};
pub use role_ports::{CurrentUserSource, RoleAssignmentSource, SessionTokenStore};
