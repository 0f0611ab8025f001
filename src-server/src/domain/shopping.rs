//! Shopping List Entity

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// An entry on the to-buy list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Option<String>,
    pub is_purchased: bool,
    pub added_date: NaiveDateTime,
    pub notes: Option<String>,
}

impl ShoppingItem {
    pub fn new(name: String, quantity: f64, unit: String, category: Option<String>) -> Self {
        Self {
            id: 0,
            name,
            quantity,
            unit,
            category,
            is_purchased: false,
            added_date: chrono::Local::now().naive_local(),
            notes: None,
        }
    }
}

impl Entity for ShoppingItem {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShoppingInput {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ShoppingInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("item name is required".into()));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(DomainError::InvalidInput("quantity must be positive".into()));
        }
        Ok(())
    }

    pub fn into_item(self) -> ShoppingItem {
        let mut item = ShoppingItem::new(self.name, self.quantity, self.unit, self.category);
        item.notes = self.notes;
        item
    }
}

/// Body of the purchased toggle
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedInput {
    pub is_purchased: bool,
}
