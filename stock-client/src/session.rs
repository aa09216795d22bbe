//! Login session
//!
//! The bearer token lives in an explicit [`Session`] that is handed to the
//! HTTP client at construction. Lifecycle:
//!
//! ```text
//! LoggedOut --login--> Active --logout--> LoggedOut
//!                        |
//!                        +--401--> Expired --login--> Active
//! ```
//!
//! A [`SessionStore`] optionally persists the token as a JSON file with a
//! single `"token"` key, so the desk stays logged in across runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Session persistence error
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    Active,
    /// The server answered 401; the token was dropped
    Expired,
}

/// On-disk shape of a persisted session
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Token file storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the parent directory if needed
    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, token: &str) -> Result<(), SessionError> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(&StoredSession {
            token: token.to_string(),
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the stored token; unreadable files count as no token
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        let stored: StoredSession = serde_json::from_str(&json).ok()?;
        Some(stored.token).filter(|t| !t.is_empty())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Authentication session injected into [`crate::HttpClient`]
#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
    state: SessionState,
    store: Option<SessionStore>,
}

/// Session shared between clones of the HTTP client
pub type SharedSession = Arc<RwLock<Session>>;

impl Session {
    /// In-memory session, logged out
    pub fn new() -> Self {
        Self::default()
    }

    /// Logged-out session that persists future logins to `store`
    pub fn with_store(store: SessionStore) -> Self {
        Self {
            store: Some(store),
            ..Self::default()
        }
    }

    /// Resume from `store`: active if a token was saved, logged out otherwise
    pub fn restore(store: SessionStore) -> Self {
        let token = store.load();
        let state = if token.is_some() {
            SessionState::Active
        } else {
            SessionState::LoggedOut
        };
        debug!(path = %store.path().display(), ?state, "Session restored");
        Self {
            token,
            state,
            store: Some(store),
        }
    }

    /// Wrap for sharing with the HTTP client
    pub fn shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    /// Record a fresh token after login
    pub fn activate(&mut self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        if let Some(store) = &self.store {
            store.save(&token)?;
        }
        self.token = Some(token);
        self.state = SessionState::Active;
        info!("Session active");
        Ok(())
    }

    /// Operator-initiated logout
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.token = None;
        self.state = SessionState::LoggedOut;
        if let Some(store) = &self.store {
            store.delete()?;
        }
        info!("Logged out");
        Ok(())
    }

    /// Server rejected the token
    ///
    /// Never fails: a token file that cannot be removed is only logged,
    /// the in-memory token is dropped regardless.
    pub fn expire(&mut self) {
        self.token = None;
        self.state = SessionState::Expired;
        if let Some(store) = &self.store
            && let Err(e) = store.delete()
        {
            warn!(error = %e, "Failed to remove expired session token");
        }
        warn!("Session expired, login required");
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn store(&self) -> Option<&SessionStore> {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("auth/session.json"));

        assert!(store.load().is_none());
        store.save("abc").unwrap();
        assert!(store.exists());
        assert_eq!(store.load().as_deref(), Some("abc"));

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["token"], "abc");

        store.delete().unwrap();
        assert!(!store.exists());
    }

    #[test]
    fn test_lifecycle() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let mut session = Session::with_store(store.clone());
        assert_eq!(session.state(), SessionState::LoggedOut);

        session.activate("t1").unwrap();
        assert!(session.is_active());
        assert_eq!(session.token(), Some("t1"));

        // A new process picks the token back up
        let resumed = Session::restore(store.clone());
        assert!(resumed.is_active());
        assert_eq!(resumed.token(), Some("t1"));

        session.expire();
        assert_eq!(session.state(), SessionState::Expired);
        assert!(session.token().is_none());
        assert!(!store.exists());

        session.activate("t2").unwrap();
        session.logout().unwrap();
        assert_eq!(session.state(), SessionState::LoggedOut);
        assert!(Session::restore(store).token().is_none());
    }

    #[test]
    fn test_corrupt_file_is_logged_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let session = Session::restore(SessionStore::new(path));
        assert_eq!(session.state(), SessionState::LoggedOut);
    }
}
