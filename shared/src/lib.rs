//! Shared types for the stock desk
//!
//! Domain models exchanged with the stock REST API, client-side
//! validation, and the receipt calculator used by both the client and
//! the desk front-end.

pub mod client;
pub mod error;
pub mod models;
pub mod receipt;
pub mod types;

// Re-exports
pub use error::{ValidationError, ValidationResult};
pub use receipt::{
    JoinKey, Receipt, ReceiptLine, compute_total, display_name, line_total, resolve_unit_price,
};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
