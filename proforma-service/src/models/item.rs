//! Inventory item model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{money_amount, not_blank, optional_text};

/// A stocked product. `vendor_name` is resolved from the vendor on reads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub category: String,
    pub unit: String,
    pub price: Decimal,
    pub cost: Decimal,
    pub stock_quantity: i32,
    pub min_stock_level: i32,
    pub vendor_id: Option<Uuid>,
    pub vendor_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Stock at or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level
    }

    /// Value of the units on hand at cost.
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.stock_quantity) * self.cost
    }
}

fn default_unit() -> String {
    "pcs".to_string()
}

fn default_min_stock_level() -> i32 {
    10
}

/// Input for creating an item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewItem {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub sku: String,
    #[validate(custom(function = "not_blank"))]
    pub category: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[validate(custom(function = "money_amount"))]
    pub price: Decimal,
    #[validate(custom(function = "money_amount"))]
    pub cost: Decimal,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
    #[serde(default = "default_min_stock_level")]
    #[validate(range(min = 0))]
    pub min_stock_level: i32,
    #[serde(default)]
    pub vendor_id: Option<Uuid>,
}

impl NewItem {
    pub fn into_item(
        self,
        id: Uuid,
        vendor_name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Item {
        let unit = self.unit.trim();
        Item {
            id,
            name: self.name.trim().to_string(),
            description: optional_text(self.description),
            sku: self.sku.trim().to_string(),
            category: self.category.trim().to_string(),
            unit: if unit.is_empty() { default_unit() } else { unit.to_string() },
            price: self.price,
            cost: self.cost,
            stock_quantity: self.stock_quantity,
            min_stock_level: self.min_stock_level,
            vendor_id: self.vendor_id,
            vendor_name,
            created_at,
        }
    }
}
