//! Common identifier types
//!
//! All IDs are `i64`, matching the integer primary keys of the stock API.

/// Stock item ID
pub type ItemId = i64;

/// Waiter ID
pub type WaiterId = i64;

/// Dining table ID (not the printed table number)
pub type TableId = i64;

/// Order line ID
pub type OrderId = i64;
