use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque session identifier carried in the session cookie.
pub type SessionId = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub username: String,
    pub issued_at: DateTime<Utc>,
}

/// Process-local session registry. Nothing is persisted; a restart drops
/// every session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<SessionId, SessionEntry>>,
    ttl: Option<Duration>,
}

impl SessionStore {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Start a session for `username` and return its id.
    pub fn issue(&self, username: &str) -> SessionId {
        let id = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            id.clone(),
            SessionEntry {
                username: username.to_string(),
                issued_at: Utc::now(),
            },
        );
        id
    }

    /// Username bound to `id`, if the session exists and has not expired.
    /// Expired entries are evicted on lookup.
    pub fn resolve(&self, id: &str) -> Option<String> {
        self.resolve_at(id, Utc::now())
    }

    fn resolve_at(&self, id: &str, now: DateTime<Utc>) -> Option<String> {
        let username = {
            let entry = self.sessions.get(id)?;
            if self.is_expired(&entry, now) {
                None
            } else {
                Some(entry.username.clone())
            }
        };
        if username.is_none() {
            self.sessions.remove(id);
        }
        username
    }

    fn is_expired(&self, entry: &SessionEntry, now: DateTime<Utc>) -> bool {
        self.ttl
            .is_some_and(|ttl| now.signed_duration_since(entry.issued_at) >= ttl)
    }

    /// End a session. Revoking an unknown id is a no-op.
    pub fn revoke(&self, id: &str) -> Option<SessionEntry> {
        self.sessions.remove(id).map(|(_, entry)| entry)
    }

    pub fn active(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_session_resolves_to_username() {
        let store = SessionStore::default();
        let id = store.issue("sallen");
        assert_eq!(store.resolve(&id).as_deref(), Some("sallen"));
    }

    #[test]
    fn each_login_gets_a_distinct_id() {
        let store = SessionStore::default();
        let a = store.issue("sallen");
        let b = store.issue("sallen");
        assert_ne!(a, b);
        assert_eq!(store.active(), 2);
    }

    #[test]
    fn revoke_is_idempotent() {
        let store = SessionStore::default();
        let id = store.issue("bgaines");

        assert!(store.revoke(&id).is_some());
        assert!(store.revoke(&id).is_none());
        assert_eq!(store.resolve(&id), None);
    }

    #[test]
    fn unknown_id_does_not_resolve() {
        let store = SessionStore::default();
        store.issue("sallen");
        assert_eq!(store.resolve("not-a-session"), None);
    }

    #[test]
    fn expired_session_is_evicted() {
        let store = SessionStore::new(Some(Duration::minutes(30)));
        let id = store.issue("sallen");

        let later = Utc::now() + Duration::minutes(29);
        assert_eq!(store.resolve_at(&id, later).as_deref(), Some("sallen"));

        let much_later = Utc::now() + Duration::minutes(31);
        assert_eq!(store.resolve_at(&id, much_later), None);
        assert_eq!(store.active(), 0);
    }
}
