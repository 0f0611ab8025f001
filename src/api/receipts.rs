use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::{ProcessedReceipt, Receipt, ReceiptSubmission};

impl ApiClient {
    pub async fn list_receipts(&self) -> Result<Vec<Receipt>, ApiError> {
        self.get_json(&self.endpoints.receipts, &[]).await
    }

    pub async fn submit_receipt(&self, submission: &ReceiptSubmission) -> Result<ProcessedReceipt, ApiError> {
        self.send_json(Method::POST, &self.endpoints.receipts, &[], submission).await
    }
}
