//! Stock Client - HTTP client for the stock management API
//!
//! Provides the REST collaborator, the login session it carries, the
//! per-table order cache and the table lifecycle built on top of them.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod orders;
pub mod session;
pub mod tables;

pub use api::StockApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use orders::OrderBook;
pub use session::{Session, SessionError, SessionState, SessionStore, SharedSession};
pub use tables::TableDesk;

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse};
pub use shared::{JoinKey, Receipt};
