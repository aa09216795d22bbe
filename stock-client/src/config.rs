//! Client configuration

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::{Session, SessionStore, SharedSession};
use shared::JoinKey;
use std::path::PathBuf;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Client configuration for connecting to the stock API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | STOCK_API_URL | http://127.0.0.1:3000 | API base URL |
/// | STOCK_API_TIMEOUT | 30 | Request timeout (seconds) |
/// | STOCK_SESSION_FILE | $HOME/.stock-desk/session.json | Token file |
/// | STOCK_JOIN_KEY | id | Order→item join: id, name or embedded |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://127.0.0.1:3000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Where the login token is persisted; `None` keeps it in memory
    pub session_file: Option<PathBuf>,

    /// How receipts match orders to catalog prices
    pub join_key: JoinKey,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            session_file: None,
            join_key: JoinKey::default(),
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("STOCK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            timeout: std::env::var("STOCK_API_TIMEOUT")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
            session_file: std::env::var("STOCK_SESSION_FILE")
                .ok()
                .map(PathBuf::from)
                .or_else(default_session_file),
            join_key: std::env::var("STOCK_JOIN_KEY")
                .ok()
                .and_then(|k| k.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the login token to `path`
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Keep the login token in memory only
    pub fn without_session_file(mut self) -> Self {
        self.session_file = None;
        self
    }

    /// Set the receipt join key
    pub fn with_join_key(mut self, join_key: JoinKey) -> Self {
        self.join_key = join_key;
        self
    }

    /// Session resumed from the configured token file, if any
    pub fn open_session(&self) -> SharedSession {
        let session = match &self.session_file {
            Some(path) => Session::restore(SessionStore::new(path.clone())),
            None => Session::new(),
        };
        session.shared()
    }

    /// Create an HTTP client carrying `session`
    pub fn build_http_client(&self, session: SharedSession) -> ClientResult<HttpClient> {
        HttpClient::new(self, session)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn default_session_file() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".stock-desk")
            .join("session.json")
    })
}
