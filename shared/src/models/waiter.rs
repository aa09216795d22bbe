//! Waiter Model

use crate::error::{ValidationResult, require_text};
use crate::types::WaiterId;
use serde::{Deserialize, Serialize};

/// Waiter entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waiter {
    pub id: WaiterId,
    pub name: String,
}

/// Create waiter payload (`POST /create-waiter`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaiterCreate {
    pub name: String,
}

impl WaiterCreate {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.name, "name")
    }
}
