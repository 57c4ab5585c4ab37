use std::future::Future;
use std::sync::Arc;

use eventgate_core::{AppError, AppResult};

use crate::RoleContext;

tokio::task_local! {
    static CURRENT_ROLE_CONTEXT: Arc<RoleContext>;
}

/// Runs `future` with `context` installed as the ambient role context.
pub async fn with_role_context<F>(context: Arc<RoleContext>, future: F) -> F::Output
where
    F: Future,
{
    CURRENT_ROLE_CONTEXT.scope(context, future).await
}

/// Returns the ambient role context.
///
/// Fails with [`AppError::Misuse`] when called outside [`with_role_context`]
/// or `RoleContextProvider::scope`, since that is a wiring defect rather
/// than missing role data.
pub fn current_role_context() -> AppResult<Arc<RoleContext>> {
    CURRENT_ROLE_CONTEXT.try_with(Arc::clone).map_err(|_| {
        AppError::Misuse("role context requested outside of a role context scope".to_owned())
    })
}
