//! Storage Entities
//!
//! Storage locations (fridge, pantry, ...) and the products kept in them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// A named container holding products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageLocation {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    /// Number of products with a positive quantity
    #[serde(default)]
    pub items_count: i64,
    pub created_at: NaiveDateTime,
}

impl StorageLocation {
    pub fn new(name: String, icon: String, color: String) -> Self {
        Self {
            id: 0,
            name,
            icon,
            color,
            items_count: 0,
            created_at: chrono::Local::now().naive_local(),
        }
    }
}

impl Entity for StorageLocation {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Body of create/update location requests
#[derive(Debug, Clone, Deserialize)]
pub struct LocationInput {
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_icon() -> String {
    "Package".to_string()
}

fn default_color() -> String {
    "bg-blue-500".to_string()
}

impl LocationInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("location name is required".into()));
        }
        Ok(())
    }
}

/// An on-hand product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub storage_location_id: i64,
    pub added_date: NaiveDateTime,
    pub notes: Option<String>,
    pub calories_per_100g: Option<f64>,
}

/// Body of create/update product requests (camelCase on the wire)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    pub storage_location_id: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, rename = "caloriesPer100g")]
    pub calories_per_100g: Option<f64>,
}

impl ProductInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("product name is required".into()));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(DomainError::InvalidInput("quantity must be a non-negative number".into()));
        }
        Ok(())
    }
}

/// One line of a bulk stock decrement
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    pub product_id: i64,
    pub quantity: f64,
}

/// Body of `?action=consume`
#[derive(Debug, Clone, Deserialize)]
pub struct ConsumeInput {
    pub items: Vec<Consumption>,
}

/// Detail view of one location
#[derive(Debug, Clone, Serialize)]
pub struct LocationDetail {
    pub location: StorageLocation,
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_input_requires_name() {
        let input = LocationInput { name: "   ".into(), icon: "Box".into(), color: "bg-green-500".into() };
        assert!(matches!(input.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_product_input_camel_case() {
        let json = r#"{"name":"Молоко","quantity":1.5,"unit":"л","expiryDate":"2024-05-01","storageLocationId":3,"caloriesPer100g":52}"#;
        let input: ProductInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.storage_location_id, 3);
        assert_eq!(input.expiry_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(input.calories_per_100g, Some(52.0));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_product_input_rejects_negative_quantity() {
        let json = r#"{"name":"Соль","quantity":-1,"unit":"г","storageLocationId":1}"#;
        let input: ProductInput = serde_json::from_str(json).unwrap();
        assert!(input.validate().is_err());
    }
}
