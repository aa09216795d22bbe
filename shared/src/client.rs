//! Auth DTOs shared between the HTTP client and the desk front-end

use crate::error::{ValidationResult, require_text};
use serde::{Deserialize, Serialize};

/// Login request (`POST /login`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are required
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.username, "username")?;
        require_text(&self.password, "password")
    }
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}
