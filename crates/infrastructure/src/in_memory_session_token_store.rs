use std::sync::RwLock;

use eventgate_application::SessionTokenStore;

/// In-process holder of the session's access token.
#[derive(Default)]
pub struct InMemorySessionTokenStore {
    token: RwLock<Option<String>>,
}

impl InMemorySessionTokenStore {
    /// Creates a logged-out store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `token`; blank tokens count as logged out.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_token(token);
        store
    }

    /// Stores the token issued at login.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let token = (!token.trim().is_empty()).then_some(token);
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    /// Forgets the token at logout.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

impl SessionTokenStore for InMemorySessionTokenStore {
    fn access_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }
}
