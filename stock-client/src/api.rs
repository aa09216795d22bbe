//! Typed stock API
//!
//! [`StockApi`] is the seam between the desk logic and the REST server:
//! [`HttpClient`] implements it over the network, tests substitute an
//! in-memory fake.

use crate::error::ClientResult;
use crate::http::HttpClient;
use async_trait::async_trait;
use shared::models::{
    AddToTable, DiningTable, Item, ItemCreate, ItemDelete, ItemUpdate, Order, TabCreate, Waiter,
    WaiterCreate,
};
use shared::types::{ItemId, OrderId, TableId, WaiterId};

/// Stock management REST API
#[async_trait]
pub trait StockApi: Send + Sync {
    // ========== Stock ==========

    /// `GET /stock`
    async fn list_stock(&self) -> ClientResult<Vec<Item>>;
    /// `POST /add-stock`
    async fn add_stock(&self, item: &ItemCreate) -> ClientResult<()>;
    /// `PUT /edit-stock-item`
    async fn edit_stock_item(&self, item: &ItemUpdate) -> ClientResult<()>;
    /// `DELETE /delete-stock-item` with `{id}` body
    async fn delete_stock_item(&self, id: ItemId) -> ClientResult<()>;

    // ========== Waiters ==========

    /// `GET /waiters`
    async fn list_waiters(&self) -> ClientResult<Vec<Waiter>>;
    /// `POST /create-waiter`
    async fn create_waiter(&self, waiter: &WaiterCreate) -> ClientResult<()>;
    /// `DELETE /delete-waiter/:id`
    async fn delete_waiter(&self, id: WaiterId) -> ClientResult<()>;

    // ========== Tables ==========

    /// `GET /tables`
    async fn list_tables(&self) -> ClientResult<Vec<DiningTable>>;
    /// `POST /create-waiter-tab`
    async fn create_waiter_tab(&self, tab: &TabCreate) -> ClientResult<()>;
    /// `PUT /clear-table/:id`, marks the table cleared
    async fn clear_table(&self, id: TableId) -> ClientResult<()>;

    // ========== Table orders ==========

    /// `GET /table-items/:tableId`
    async fn table_items(&self, table_id: TableId) -> ClientResult<Vec<Order>>;
    /// `POST /add-to-table`
    async fn add_to_table(&self, request: &AddToTable) -> ClientResult<()>;
    /// `DELETE /delete-order/:orderId`
    async fn delete_order(&self, order_id: OrderId) -> ClientResult<()>;

    // ========== Orders ==========

    /// `GET /orders`, server-joined rows for every table
    async fn list_orders(&self) -> ClientResult<Vec<Order>>;
    /// `GET /orders/:tableId`, server-joined rows for one table
    async fn table_orders(&self, table_id: TableId) -> ClientResult<Vec<Order>>;
    /// `DELETE /clear-table/:tableId`, deletes the table's order records
    async fn delete_table_orders(&self, table_id: TableId) -> ClientResult<()>;
}

#[async_trait]
impl StockApi for HttpClient {
    async fn list_stock(&self) -> ClientResult<Vec<Item>> {
        self.get("stock").await
    }

    async fn add_stock(&self, item: &ItemCreate) -> ClientResult<()> {
        item.validate()?;
        self.post("add-stock", item).await
    }

    async fn edit_stock_item(&self, item: &ItemUpdate) -> ClientResult<()> {
        item.validate()?;
        self.put("edit-stock-item", item).await
    }

    async fn delete_stock_item(&self, id: ItemId) -> ClientResult<()> {
        self.delete_with_body("delete-stock-item", &ItemDelete { id })
            .await
    }

    async fn list_waiters(&self) -> ClientResult<Vec<Waiter>> {
        self.get("waiters").await
    }

    async fn create_waiter(&self, waiter: &WaiterCreate) -> ClientResult<()> {
        waiter.validate()?;
        self.post("create-waiter", waiter).await
    }

    async fn delete_waiter(&self, id: WaiterId) -> ClientResult<()> {
        self.delete(&format!("delete-waiter/{}", id)).await
    }

    async fn list_tables(&self) -> ClientResult<Vec<DiningTable>> {
        self.get("tables").await
    }

    async fn create_waiter_tab(&self, tab: &TabCreate) -> ClientResult<()> {
        tab.validate_fields()?;
        self.post("create-waiter-tab", tab).await
    }

    async fn clear_table(&self, id: TableId) -> ClientResult<()> {
        self.put_empty(&format!("clear-table/{}", id)).await
    }

    async fn table_items(&self, table_id: TableId) -> ClientResult<Vec<Order>> {
        self.get(&format!("table-items/{}", table_id)).await
    }

    async fn add_to_table(&self, request: &AddToTable) -> ClientResult<()> {
        request.validate()?;
        self.post("add-to-table", request).await
    }

    async fn delete_order(&self, order_id: OrderId) -> ClientResult<()> {
        self.delete(&format!("delete-order/{}", order_id)).await
    }

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.get("orders").await
    }

    async fn table_orders(&self, table_id: TableId) -> ClientResult<Vec<Order>> {
        self.get(&format!("orders/{}", table_id)).await
    }

    async fn delete_table_orders(&self, table_id: TableId) -> ClientResult<()> {
        self.delete(&format!("clear-table/{}", table_id)).await
    }
}
