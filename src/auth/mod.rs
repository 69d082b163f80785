//! Login, session lookup and logout.
//!
//! Layout:
//! - `credentials.rs`: the `CredentialVerifier` seam and the static allow-list
//! - `sessions.rs`: in-memory session registry

pub mod credentials;
pub mod sessions;

pub use credentials::{CredentialVerifier, StaticCredentials};
pub use sessions::{SessionEntry, SessionId, SessionStore};

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::StockroomError;

/// Ties a credential source to the session registry.
#[derive(Clone)]
pub struct Authenticator {
    verifier: Arc<dyn CredentialVerifier>,
    sessions: SessionStore,
}

impl Authenticator {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, sessions: SessionStore) -> Self {
        Self { verifier, sessions }
    }

    /// Check the pair and open a session. Unknown users and wrong passwords
    /// fail identically.
    pub fn login(&self, username: &str, password: &str) -> Result<SessionId, StockroomError> {
        if !self.verifier.verify(username, password) {
            warn!(username, "login rejected");
            return Err(StockroomError::InvalidCredentials);
        }
        let id = self.sessions.issue(username);
        info!(username, active = self.sessions.active(), "login succeeded");
        Ok(id)
    }

    /// Username for an active session, or `Unauthenticated`.
    pub fn require_session(&self, session_id: Option<&str>) -> Result<String, StockroomError> {
        session_id
            .and_then(|id| self.sessions.resolve(id))
            .ok_or(StockroomError::Unauthenticated)
    }

    pub fn logout(&self, session_id: Option<&str>) {
        if let Some(entry) = session_id.and_then(|id| self.sessions.revoke(id)) {
            info!(username = %entry.username, "logged out");
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
