//! Table lifecycle
//!
//! A table tab is `Active` while it collects orders and `Cleared` once it
//! is settled. [`TableDesk`] drives the transitions against the API and
//! keeps the [`OrderBook`] consistent with them. Local state is only
//! touched after the API call succeeded, so a failed call leaves the desk
//! exactly as it was.
//!
//! Printing and settling are two separate steps: [`TableDesk::finalize_receipt`]
//! computes a [`Receipt`] without side effects, [`TableDesk::settle_table`]
//! takes that receipt once the operator confirms and deletes the orders.

use crate::api::StockApi;
use crate::error::{ClientError, ClientResult};
use crate::orders::OrderBook;
use shared::models::{AddToTable, DiningTable, Order, TabCreate, TableStatus};
use shared::types::{ItemId, OrderId, TableId};
use shared::{JoinKey, Receipt};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

pub struct TableDesk<A> {
    api: A,
    orders: OrderBook,
    tables: HashMap<TableId, DiningTable>,
    join_key: JoinKey,
}

impl<A: StockApi> TableDesk<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            orders: OrderBook::new(),
            tables: HashMap::new(),
            join_key: JoinKey::default(),
        }
    }

    /// Set how receipts match orders to prices
    pub fn with_join_key(mut self, join_key: JoinKey) -> Self {
        self.join_key = join_key;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn order_book(&self) -> &OrderBook {
        &self.orders
    }

    pub fn join_key(&self) -> JoinKey {
        self.join_key
    }

    // ========== Tables ==========

    /// Re-fetch all tables, sorted by table number
    pub async fn refresh_tables(&mut self) -> ClientResult<Vec<DiningTable>> {
        let mut tables = self.api.list_tables().await?;
        tables.sort_by_key(|t| t.number);
        self.tables = tables.iter().map(|t| (t.id, t.clone())).collect();
        Ok(tables)
    }

    /// Last known state of a table
    pub fn table(&self, table_id: TableId) -> Option<&DiningTable> {
        self.tables.get(&table_id)
    }

    pub fn status(&self, table_id: TableId) -> Option<TableStatus> {
        self.table(table_id).map(DiningTable::status)
    }

    /// Known table, refreshing the list once on a miss
    async fn ensure_table(&mut self, table_id: TableId) -> ClientResult<DiningTable> {
        if !self.tables.contains_key(&table_id) {
            self.refresh_tables().await?;
        }
        self.tables
            .get(&table_id)
            .cloned()
            .ok_or(ClientError::UnknownTable(table_id))
    }

    /// Open a new tab; the waiter must exist
    #[instrument(skip(self), fields(number = tab.number, waiter_id = tab.waiter_id))]
    pub async fn open_tab(&mut self, tab: TabCreate) -> ClientResult<()> {
        let waiters = self.api.list_waiters().await?;
        tab.validate(&waiters)?;

        self.api.create_waiter_tab(&tab).await?;
        info!("Tab opened");
        self.refresh_tables().await?;
        Ok(())
    }

    // ========== Orders ==========

    /// Active orders of a table, cached until invalidated
    pub async fn orders_for_table(&mut self, table_id: TableId) -> ClientResult<&[Order]> {
        self.orders.orders_for_table(&self.api, table_id).await
    }

    /// Append an order to a table tab
    ///
    /// Adding to a cleared table is not rejected, only logged.
    #[instrument(skip(self))]
    pub async fn add_item(
        &mut self,
        table_id: TableId,
        item_id: ItemId,
        quantity: u32,
    ) -> ClientResult<()> {
        let request = AddToTable {
            table_id,
            item_id,
            quantity,
        };
        request.validate()?;

        if self.status(table_id) == Some(TableStatus::Cleared) {
            warn!("Adding to a cleared table");
        }

        self.api.add_to_table(&request).await?;
        self.orders.invalidate(table_id);
        info!("Item added to table");
        Ok(())
    }

    /// Delete one order and invalidate its table
    ///
    /// Returns the owning table when it was cached. An order that is not in
    /// any cached list leaves every cached list valid.
    #[instrument(skip(self))]
    pub async fn delete_order(&mut self, order_id: OrderId) -> ClientResult<Option<TableId>> {
        let owner = self.orders.owner_of(order_id);

        self.api.delete_order(order_id).await?;
        if let Some(table_id) = owner {
            self.orders.invalidate(table_id);
        }
        info!(table_id = ?owner, "Order deleted");
        Ok(owner)
    }

    /// Mark a table cleared; its cached orders become empty
    #[instrument(skip(self))]
    pub async fn clear_table(&mut self, table_id: TableId) -> ClientResult<()> {
        self.api.clear_table(table_id).await?;

        self.orders.settle(table_id);
        if let Some(table) = self.tables.get_mut(&table_id) {
            table.cleared = true;
        }
        info!("Table cleared");
        Ok(())
    }

    // ========== Receipts ==========

    /// Compute a table's receipt; nothing is modified
    ///
    /// With [`JoinKey::Embedded`] the server-joined rows of
    /// `GET /orders/:tableId` are used, otherwise the cached table orders
    /// are joined against the current stock list.
    #[instrument(skip(self))]
    pub async fn finalize_receipt(&mut self, table_id: TableId) -> ClientResult<Receipt> {
        let table = self.ensure_table(table_id).await?;

        let orders = match self.join_key {
            JoinKey::Embedded => self.api.table_orders(table_id).await?,
            JoinKey::Id | JoinKey::Name => self.orders_for_table(table_id).await?.to_vec(),
        };
        let items = self.api.list_stock().await?;
        let waiters = self.api.list_waiters().await?;
        let waiter = waiters.iter().find(|w| w.id == table.waiter_id);

        let receipt = Receipt::finalize_now(&table, waiter, &orders, &items, self.join_key);
        info!(
            lines = receipt.lines.len(),
            total = %receipt.total,
            "Receipt finalized"
        );
        Ok(receipt)
    }

    /// Settle a finalized receipt: delete the table's orders, then clear it
    ///
    /// Callers confirm with the operator before calling this.
    #[instrument(skip(self, receipt), fields(table_id = receipt.table_id))]
    pub async fn settle_table(&mut self, receipt: &Receipt) -> ClientResult<()> {
        let table_id = receipt.table_id;

        self.api.delete_table_orders(table_id).await?;
        self.orders.invalidate(table_id);
        info!("Table orders deleted");

        self.clear_table(table_id).await
    }
}
