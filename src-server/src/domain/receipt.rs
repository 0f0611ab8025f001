//! Receipt Entities

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::budget::GROCERIES_CATEGORY;
use super::entity::{DomainError, DomainResult};

pub const RECEIPT_PENDING: &str = "pending";
pub const RECEIPT_PROCESSED: &str = "processed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: i64,
    pub qr_code: String,
    pub total_amount: Option<f64>,
    pub scan_date: NaiveDateTime,
    pub status: String,
}

/// One purchased line as reported by the receipt lookup
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptItemInput {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Line total; price × quantity when absent
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub budget_category_name: Option<String>,
}

fn default_quantity() -> f64 {
    1.0
}

impl ReceiptItemInput {
    pub fn line_total(&self) -> f64 {
        self.total.unwrap_or(self.price * self.quantity)
    }

    pub fn category_name(&self) -> &str {
        self.budget_category_name.as_deref().unwrap_or(GROCERIES_CATEGORY)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptInput {
    pub qr_code: String,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub items: Vec<ReceiptItemInput>,
}

impl ReceiptInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.qr_code.trim().is_empty() {
            return Err(DomainError::InvalidInput("qr_code is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedReceipt {
    pub receipt: Receipt,
    pub total_amount: f64,
    pub items_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_defaults() {
        let item: ReceiptItemInput = serde_json::from_str(r#"{"name":"Хлеб","price":45.5}"#).unwrap();
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.line_total(), 45.5);
        assert_eq!(item.category_name(), "Продукты");

        let item: ReceiptItemInput =
            serde_json::from_str(r#"{"name":"Сыр","price":300,"quantity":2,"total":580}"#).unwrap();
        assert_eq!(item.line_total(), 580.0);
    }
}
