//! Client-side validation errors
//!
//! Payloads are checked before submission so that a request the server
//! would reject for a missing field is never sent.

use crate::types::WaiterId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failure for an outgoing payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A numeric field is below its minimum
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: i64,
        value: i64,
    },

    /// A money field is negative
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    /// A table tab references a waiter that does not exist
    #[error("Unknown waiter: {0}")]
    UnknownWaiter(WaiterId),
}

/// Result type for validation
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Reject empty or whitespace-only text
pub(crate) fn require_text(value: &str, field: &'static str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Reject values below `min`
pub(crate) fn require_min(value: i64, min: i64, field: &'static str) -> ValidationResult {
    if value < min {
        return Err(ValidationError::TooSmall { field, min, value });
    }
    Ok(())
}

/// Reject negative prices
pub(crate) fn require_non_negative(value: Decimal, field: &'static str) -> ValidationResult {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}
