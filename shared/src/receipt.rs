//! Receipt calculation
//!
//! Joins a table's orders against the item catalog, resolves unit prices
//! and reduces to a total. Every function here is total: an order whose
//! item cannot be resolved contributes a unit price of zero instead of
//! failing, so a receipt always renders even against a stale catalog.

use crate::models::{DiningTable, Item, Order, Waiter};
use crate::types::{OrderId, TableId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// How an order is matched to its price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKey {
    /// Match `order.item_id == item.id`
    #[default]
    Id,
    /// Match `order.item_name == item.name`
    ///
    /// Deprecated: a renamed item or two items sharing a name silently
    /// mis-join. Kept for backends that only return item names.
    Name,
    /// Use the price the server already joined into the order row
    Embedded,
}

/// Unknown join key name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown join key '{0}', expected one of: id, name, embedded")]
pub struct ParseJoinKeyError(pub String);

impl FromStr for JoinKey {
    type Err = ParseJoinKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "embedded" => Ok(Self::Embedded),
            other => Err(ParseJoinKeyError(other.to_string())),
        }
    }
}

impl std::fmt::Display for JoinKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id => write!(f, "id"),
            Self::Name => write!(f, "name"),
            Self::Embedded => write!(f, "embedded"),
        }
    }
}

/// Find the catalog item an order refers to
///
/// `Embedded` rows match by id first, then by name. The catalog price
/// only applies when the row carries no price of its own.
pub fn find_item<'a>(order: &Order, items: &'a [Item], key: JoinKey) -> Option<&'a Item> {
    let by_id = move || {
        order
            .item_id
            .and_then(|id| items.iter().find(|item| item.id == id))
    };
    let by_name = move || {
        order
            .item_name
            .as_deref()
            .and_then(|name| items.iter().find(|item| item.name == name))
    };

    match key {
        JoinKey::Id => by_id(),
        JoinKey::Name => by_name(),
        JoinKey::Embedded => by_id().or_else(by_name),
    }
}

/// Unit price of an order, zero when it cannot be resolved
pub fn resolve_unit_price(order: &Order, items: &[Item], key: JoinKey) -> Decimal {
    let price = match key {
        JoinKey::Id | JoinKey::Name => find_item(order, items, key).map(|item| item.price),
        JoinKey::Embedded => order
            .price
            .or_else(|| find_item(order, items, key).map(|item| item.price)),
    };

    price.unwrap_or_else(|| {
        debug!(
            order_id = order.id,
            item_id = ?order.item_id,
            item_name = ?order.item_name,
            join = %key,
            "Order item not resolved, pricing at zero"
        );
        Decimal::ZERO
    })
}

/// `unit_price * quantity` for one order
pub fn line_total(order: &Order, items: &[Item], key: JoinKey) -> Decimal {
    resolve_unit_price(order, items, key) * Decimal::from(order.quantity)
}

/// Sum of all line totals; zero for an empty order list
pub fn compute_total(orders: &[Order], items: &[Item], key: JoinKey) -> Decimal {
    orders
        .iter()
        .map(|order| line_total(order, items, key))
        .sum()
}

/// One printed row of a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub order_id: OrderId,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Read-only projection of a table's orders with resolved prices
///
/// `printed_at` is when the receipt was finalized, not when the orders
/// were placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub table_id: TableId,
    pub table_number: u32,
    pub waiter_name: Option<String>,
    pub lines: Vec<ReceiptLine>,
    pub total: Decimal,
    pub printed_at: DateTime<Utc>,
}

impl Receipt {
    /// Compute and freeze a receipt for `table`
    pub fn finalize(
        table: &DiningTable,
        waiter: Option<&Waiter>,
        orders: &[Order],
        items: &[Item],
        key: JoinKey,
        printed_at: DateTime<Utc>,
    ) -> Self {
        let lines: Vec<ReceiptLine> = orders
            .iter()
            .map(|order| {
                let unit_price = resolve_unit_price(order, items, key);
                ReceiptLine {
                    order_id: order.id,
                    item_name: display_name(order, items, key),
                    quantity: order.quantity,
                    unit_price,
                    line_total: unit_price * Decimal::from(order.quantity),
                }
            })
            .collect();
        let total = lines.iter().map(|line| line.line_total).sum();

        Self {
            table_id: table.id,
            table_number: table.number,
            waiter_name: waiter
                .map(|w| w.name.clone())
                .or_else(|| table.name.clone()),
            lines,
            total,
            printed_at,
        }
    }

    /// Same as [`Receipt::finalize`], stamped with the current time
    pub fn finalize_now(
        table: &DiningTable,
        waiter: Option<&Waiter>,
        orders: &[Order],
        items: &[Item],
        key: JoinKey,
    ) -> Self {
        Self::finalize(table, waiter, orders, items, key, Utc::now())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Name to show for an order: its own name, else the joined catalog name
pub fn display_name(order: &Order, items: &[Item], key: JoinKey) -> String {
    if let Some(name) = &order.item_name {
        return name.clone();
    }
    if let Some(item) = find_item(order, items, key) {
        return item.name.clone();
    }
    match order.item_id {
        Some(id) => format!("Item #{}", id),
        None => "Unknown item".to_string(),
    }
}
