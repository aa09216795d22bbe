//! Data models
//!
//! Shapes of the JSON exchanged with the stock API. Field names follow the
//! API's camelCase; the all-lowercase spellings some endpoints return
//! (`itemname`, `waiterid`, ...) are accepted as aliases.

pub mod dining_table;
pub mod item;
pub mod order;
pub mod waiter;

// Re-exports
pub use dining_table::*;
pub use item::*;
pub use order::*;
pub use waiter::*;
