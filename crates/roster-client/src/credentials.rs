// In-memory credential store shared across the process

use std::sync::RwLock;

use roster_api::model::Session;

/// Holds the session granted by the last successful login.
///
/// The store is created explicitly and handed to whoever needs it behind
/// an `Arc`; nothing in this crate keeps a process-global. The HTTP
/// gateway only ever reads from it. Writes happen in exactly three
/// places: login, logout, and restoring a persisted session at startup.
#[derive(Debug, Default)]
pub struct CredentialStore {
    session: RwLock<Option<Session>>,
}

impl CredentialStore {
    /// Create an empty store (not logged in)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with a previously persisted session
    pub fn restored(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }

    /// Replace the current session after a successful login
    pub fn set(&self, session: Session) {
        let mut guard = self.session.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(session);
    }

    /// Drop the current session on logout
    pub fn clear(&self) {
        let mut guard = self.session.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    /// Bearer token to attach to outgoing requests, if logged in
    pub fn access_token(&self) -> Option<String> {
        let guard = self.session.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|s| s.access_token.clone())
    }

    /// Snapshot of the whole session, e.g. for persisting to disk
    pub fn session(&self) -> Option<Session> {
        let guard = self.session.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        let guard = self.session.read().unwrap_or_else(|e| e.into_inner());
        guard.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_api::model::SessionUser;

    fn session(token: &str) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: "refresh".to_string(),
            user: SessionUser {
                id: "u1".to_string(),
                login_id: "admin".to_string(),
                name: "Admin".to_string(),
            },
        }
    }

    #[test]
    fn test_store_lifecycle() {
        let store = CredentialStore::new();
        assert!(!store.is_authenticated());
        assert!(store.access_token().is_none());

        store.set(session("tok-1"));
        assert!(store.is_authenticated());
        assert_eq!(store.access_token().as_deref(), Some("tok-1"));

        store.set(session("tok-2"));
        assert_eq!(store.access_token().as_deref(), Some("tok-2"));

        store.clear();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_restored_store_is_authenticated() {
        let store = CredentialStore::restored(session("tok-old"));
        assert_eq!(store.access_token().as_deref(), Some("tok-old"));
    }
}
