//! Budget Entities
//!
//! Categories, ledger transactions, analytics rows and user settings.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Name of the expense category receipts and planning fall back to
pub const GROCERIES_CATEGORY: &str = "Продукты";

/// Direction of money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        TransactionKind::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown transaction type {s}").into()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub icon: String,
    pub color: String,
}

impl Entity for BudgetCategory {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default = "default_category_icon")]
    pub icon: String,
    #[serde(default = "default_category_color")]
    pub color: String,
}

fn default_category_icon() -> String {
    "Wallet".to_string()
}

fn default_category_color() -> String {
    "bg-gray-500".to_string()
}

impl CategoryInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("category name is required".into()));
        }
        Ok(())
    }

    pub fn into_category(self, id: i64) -> BudgetCategory {
        BudgetCategory {
            id,
            name: self.name.trim().to_string(),
            kind: self.kind,
            icon: self.icon,
            color: self.color,
        }
    }
}

/// A ledger entry, with the category's presentation joined in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub receipt_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to today
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl TransactionInput {
    pub fn validate(&self) -> DomainResult<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(DomainError::InvalidInput("amount must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionsPage {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
}

/// Per-category total over an analytics window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub icon: String,
    pub color: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub id: i64,
    pub daily_calorie_goal: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsInput {
    pub daily_calorie_goal: i64,
}

impl SettingsInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.daily_calorie_goal <= 0 {
            return Err(DomainError::InvalidInput("daily calorie goal must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TransactionKind::Expense).unwrap(), "\"expense\"");
        assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("gift"), None);
    }

    #[test]
    fn test_transaction_input_amount_must_be_positive() {
        let input: TransactionInput = serde_json::from_str(r#"{"type":"expense","amount":0}"#).unwrap();
        assert!(input.validate().is_err());
        let input: TransactionInput = serde_json::from_str(r#"{"type":"income","amount":100.5}"#).unwrap();
        assert!(input.validate().is_ok());
        assert!(input.date.is_none());
    }
}
