use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;

use super::{action, id, ApiClient, ApiError};
use crate::models::{BudgetCategory, CategoryTotal, Settings, Transaction, TransactionDraft, TransactionsPage};

#[derive(Serialize)]
struct SettingsBody {
    daily_calorie_goal: i64,
}

impl ApiClient {
    pub async fn list_categories(&self) -> Result<Vec<BudgetCategory>, ApiError> {
        self.get_json(&self.endpoints.budget, &[action("categories")]).await
    }

    /// Transactions in `[start, end]` (either bound optional) with income/expense totals
    pub async fn list_transactions(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<TransactionsPage, ApiError> {
        let mut query = Vec::new();
        if let Some(start) = start {
            query.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = end {
            query.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        self.get_json(&self.endpoints.budget, &query).await
    }

    pub async fn analytics(&self, period_days: u32) -> Result<Vec<CategoryTotal>, ApiError> {
        self.get_json(
            &self.endpoints.budget,
            &[action("analytics"), ("period", period_days.to_string())],
        )
        .await
    }

    pub async fn add_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ApiError> {
        self.send_json(Method::POST, &self.endpoints.budget, &[], draft).await
    }

    pub async fn delete_transaction(&self, transaction_id: i64) -> Result<(), ApiError> {
        self.delete(
            &self.endpoints.budget,
            &[action("delete_transaction"), id("id", transaction_id)],
        )
        .await
    }

    pub async fn settings(&self) -> Result<Settings, ApiError> {
        self.get_json(&self.endpoints.budget, &[action("settings")]).await
    }

    pub async fn update_calorie_goal(&self, daily_calorie_goal: i64) -> Result<Settings, ApiError> {
        self.send_json(
            Method::PUT,
            &self.endpoints.budget,
            &[action("settings")],
            &SettingsBody { daily_calorie_goal },
        )
        .await
    }
}
