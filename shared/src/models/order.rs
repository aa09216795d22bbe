//! Order Model

use crate::error::{ValidationResult, require_min};
use crate::types::{ItemId, OrderId, TableId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One order line on a table tab
///
/// An order references its item by id, by name, or both, depending on the
/// endpoint it came from. Rows from `GET /orders` and `GET /orders/:tableId`
/// are joined server-side and also carry price, table number, waiter name
/// and order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Owning table; rows without it are stamped by the caller that fetched them
    #[serde(default, alias = "tableid")]
    pub table_id: TableId,
    #[serde(default, alias = "itemid", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(default, alias = "itemname", skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    pub quantity: u32,
    /// Unit price joined by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, alias = "tablenumber", skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    #[serde(default, alias = "waitername", skip_serializing_if = "Option::is_none")]
    pub waiter_name: Option<String>,
    #[serde(default, alias = "ordertime", skip_serializing_if = "Option::is_none")]
    pub order_time: Option<String>,
}

impl Order {
    /// Minimal order referencing an item by id
    pub fn new(id: OrderId, table_id: TableId, item_id: ItemId, quantity: u32) -> Self {
        Self {
            id,
            table_id,
            item_id: Some(item_id),
            item_name: None,
            quantity,
            price: None,
            table_number: None,
            waiter_name: None,
            order_time: None,
        }
    }

    pub fn with_item_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }
}

/// Add an item to a table (`POST /add-to-table`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToTable {
    pub table_id: TableId,
    pub item_id: ItemId,
    pub quantity: u32,
}

impl AddToTable {
    pub fn validate(&self) -> ValidationResult {
        require_min(i64::from(self.quantity), 1, "quantity")
    }
}
