//! Product Catalog Entity
//!
//! Reference data, independent of on-hand products.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

pub const DEFAULT_UNIT: &str = "г";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub calories_per_100g: Option<f64>,
    pub default_unit: String,
}

impl Entity for CatalogEntry {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogInput {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub calories_per_100g: Option<f64>,
    #[serde(default)]
    pub default_unit: Option<String>,
}

impl CatalogInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("catalog name is required".into()));
        }
        if matches!(self.calories_per_100g, Some(c) if c < 0.0) {
            return Err(DomainError::InvalidInput("calories must not be negative".into()));
        }
        Ok(())
    }

    pub fn into_entry(self, id: i64) -> CatalogEntry {
        CatalogEntry {
            id,
            name: self.name.trim().to_string(),
            category: self.category.filter(|c| !c.trim().is_empty()),
            calories_per_100g: self.calories_per_100g,
            default_unit: self
                .default_unit
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_UNIT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_unit_is_grams() {
        let input: CatalogInput = serde_json::from_str(r#"{"name":" Гречка ","category":""}"#).unwrap();
        let entry = input.into_entry(0);
        assert_eq!(entry.name, "Гречка");
        assert_eq!(entry.default_unit, "г");
        assert_eq!(entry.category, None);
    }
}
