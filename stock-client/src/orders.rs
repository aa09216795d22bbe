//! Per-table order cache
//!
//! [`OrderBook`] maps a table id to its active orders. A table's list is
//! fetched on first access and kept until one of the invalidation hooks
//! runs for that same table:
//!
//! - an order was added to the table → [`OrderBook::invalidate`]
//! - an order was deleted from the table → [`OrderBook::invalidate`]
//! - the table was cleared → [`OrderBook::settle`]
//!
//! Hooks never touch other tables. Fetches are not deduplicated; when two
//! desks race, whichever response lands last is what the cache holds.

use crate::api::StockApi;
use crate::error::ClientResult;
use shared::models::Order;
use shared::types::{OrderId, TableId};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct OrderBook {
    tables: HashMap<TableId, Vec<Order>>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders of `table_id`, fetched through `api` when not cached
    ///
    /// Fetched orders are stamped with `table_id`, the endpoint does not
    /// always echo it back.
    pub async fn orders_for_table<A>(&mut self, api: &A, table_id: TableId) -> ClientResult<&[Order]>
    where
        A: StockApi + ?Sized,
    {
        if !self.tables.contains_key(&table_id) {
            let mut orders = api.table_items(table_id).await?;
            for order in &mut orders {
                order.table_id = table_id;
            }
            debug!(table_id, count = orders.len(), "Table orders fetched");
            self.tables.insert(table_id, orders);
        }

        Ok(self
            .tables
            .get(&table_id)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Cached orders, without fetching
    pub fn cached(&self, table_id: TableId) -> Option<&[Order]> {
        self.tables.get(&table_id).map(Vec::as_slice)
    }

    /// Drop the cached list so the next read re-fetches
    ///
    /// Returns whether anything was cached.
    pub fn invalidate(&mut self, table_id: TableId) -> bool {
        let removed = self.tables.remove(&table_id).is_some();
        debug!(table_id, removed, "Table orders invalidated");
        removed
    }

    /// Record that the table holds no orders anymore
    pub fn settle(&mut self, table_id: TableId) {
        self.tables.insert(table_id, Vec::new());
        debug!(table_id, "Table orders settled");
    }

    /// Table whose cached list contains `order_id`
    pub fn owner_of(&self, order_id: OrderId) -> Option<TableId> {
        self.tables
            .iter()
            .find(|(_, orders)| orders.iter().any(|o| o.id == order_id))
            .map(|(table_id, _)| *table_id)
    }

    /// Whether `table_id` has a cached list
    pub fn is_cached(&self, table_id: TableId) -> bool {
        self.tables.contains_key(&table_id)
    }

    /// Forget every table
    pub fn clear(&mut self) {
        self.tables.clear();
    }
}
