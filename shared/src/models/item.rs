//! Stock Item Model

use crate::error::{ValidationResult, require_min, require_non_negative, require_text};
use crate::types::ItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Stock on hand
    pub quantity: u32,
    /// Unit price in currency unit
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// Create item payload (`POST /add-stock`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub quantity: u32,
    /// Sent as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ItemCreate {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.name, "name")?;
        require_min(i64::from(self.quantity), 1, "quantity")?;
        require_non_negative(self.price, "price")
    }
}

/// Edit item payload (`PUT /edit-stock-item`)
///
/// The API expects the full form values plus the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    /// Sent as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ItemUpdate {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.name, "name")?;
        require_min(i64::from(self.quantity), 1, "quantity")?;
        require_non_negative(self.price, "price")
    }
}

impl From<&Item> for ItemUpdate {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price,
            description: item.description.clone(),
        }
    }
}

/// Delete item payload (`DELETE /delete-stock-item`, sent as the body)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemDelete {
    pub id: ItemId,
}
