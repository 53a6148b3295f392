//! In-memory holder for the session the auth collaborator handed back

use std::sync::{Arc, RwLock};

use super::types::{AuthSession, Role};

/// Shared, clonable slot for the current session.
///
/// Nothing is persisted; the slot lives as long as the application context.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionStore {
    /// Get the current session
    pub fn get(&self) -> Option<AuthSession> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Set the session
    pub fn set(&self, session: AuthSession) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session);
    }

    pub fn clear(&self) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    pub fn token(&self) -> Option<String> {
        self.get().map(|s| s.token)
    }

    pub fn role(&self) -> Option<Role> {
        self.get().map(|s| s.role())
    }

    pub fn is_signed_in(&self) -> bool {
        self.get().is_some()
    }
}
