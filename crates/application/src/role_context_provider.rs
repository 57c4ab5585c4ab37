use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use eventgate_core::AppResult;
use eventgate_domain::PermissionTable;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::role_context_scope::with_role_context;
use crate::{
    CurrentUserSource, RoleAssignmentSource, RoleContext, SessionTokenStore, SourceState,
};


/// External ports the role context is loaded from.
#[derive(Clone)]
pub struct RoleContextSources {
    /// Role assignment list.
    pub assignments: Arc<dyn RoleAssignmentSource>,
    /// Authenticated user profile.
    pub current_user: Arc<dyn CurrentUserSource>,
    /// Session token holder gating both fetches.
    pub session: Arc<dyn SessionTokenStore>,
}

/// Loads role data from external sources and publishes role context snapshots.
///
/// The provider never retries or caches; each `refresh` derives a new snapshot
/// from the two fetch results and replaces the published one as a whole.
pub struct RoleContextProvider {
    sources: RoleContextSources,
    table: Arc<PermissionTable>,
    sender: watch::Sender<Arc<RoleContext>>,
    generation: AtomicU64,
}

impl RoleContextProvider {
    /// Creates a provider in the loading state.
    #[must_use]
    pub fn new(sources: RoleContextSources, table: Arc<PermissionTable>) -> Self {
        let (sender, _) = watch::channel(Arc::new(RoleContext::loading(table.clone())));
        Self {
            sources,
            table,
            sender,
            generation: AtomicU64::new(0),
        }
    }

    /// Returns the latest published snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<RoleContext> {
        self.sender.borrow().clone()
    }

    /// Subscribes to snapshot replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<RoleContext>> {
        self.sender.subscribe()
    }

    /// Fetches the current user and the role list and publishes the result.
    ///
    /// Without a session token nothing is fetched and a signed-out snapshot is
    /// published. Fetch failures are logged and published as a failed
    /// snapshot. A result is dropped when a later `refresh` or `clear` started
    /// before it completed.
    pub async fn refresh(&self) -> Arc<RoleContext> {
        let generation = self
            .generation
            .fetch_add(1, Ordering::SeqCst)
            .wrapping_add(1);

        if self.sources.session.access_token().is_none() {
            debug!("no session token, role context is signed out");
            let context = Arc::new(RoleContext::signed_out(self.table.clone()));
            self.publish(generation, context.clone());
            return context;
        }

        let (current_user, assignments) = tokio::join!(
            self.sources.current_user.current_user(),
            self.sources.assignments.list_role_assignments(),
        );
        let current_user = source_state("current user", current_user);
        let assignments = source_state("role assignments", assignments);

        let context = Arc::new(RoleContext::derive(
            self.table.clone(),
            &current_user,
            &assignments,
        ));

        if !self.publish(generation, context.clone()) {
            debug!("role context superseded during refresh, discarding result");
            return self.current();
        }

        info!(
            status = context.status().as_str(),
            user_id = ?context.user_id(),
            role_count = context.roles().len(),
            "role context refreshed"
        );

        context
    }

    /// Drops the published roles on logout.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.sender
            .send_replace(Arc::new(RoleContext::signed_out(self.table.clone())));
        debug!("role context cleared");
    }

    /// Runs `future` with the latest snapshot as its ambient role context.
    pub async fn scope<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        with_role_context(self.current(), future).await
    }

    fn publish(&self, generation: u64, context: Arc<RoleContext>) -> bool {
        self.sender.send_if_modified(|published| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }

            *published = context;
            true
        })
    }
}

fn source_state<T>(source: &'static str, result: AppResult<T>) -> SourceState<T> {
    match result {
        Ok(value) => SourceState::Ready(value),
        Err(error) => {
            warn!(source, error = %error, "failed to load role data");
            SourceState::Failed(format!("{source}: {error}"))
        }
    }
}
