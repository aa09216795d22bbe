//! Client error types

use crate::session::SessionError;
use shared::ValidationError;
use shared::types::TableId;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required, the session has been reset
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by the server (4xx other than auth/not-found)
    #[error("Rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Server-side failure (5xx)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Payload failed client-side validation, nothing was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Table is not known to the server
    #[error("Unknown table: {0}")]
    UnknownTable(TableId),

    /// Session token could not be persisted
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ClientError {
    /// Whether the operator has to log in again
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
