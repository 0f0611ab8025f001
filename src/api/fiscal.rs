use serde::Deserialize;

use super::{ApiClient, ApiError, ResponseExt};
use crate::models::ReceiptLine;
use crate::qr::{FiscalQr, ScanError};

/// Lookup service answer; amounts in kopecks
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    items: Vec<LookupItem>,
}

#[derive(Debug, Deserialize)]
struct LookupItem {
    name: String,
    price: i64,
    #[serde(default = "one")]
    quantity: f64,
    #[serde(default)]
    sum: Option<i64>,
}

fn one() -> f64 {
    1.0
}

fn rubles(kopecks: i64) -> f64 {
    kopecks as f64 / 100.0
}

impl ApiClient {
    /// Fetch the itemized purchase behind a fiscal QR code
    pub async fn lookup_receipt(&self, qr: &FiscalQr) -> Result<Vec<ReceiptLine>, ScanError> {
        let url = &self.endpoints.receipt_lookup;
        let response = self
            .client
            .get(url)
            .query(&qr.lookup_query())
            .send()
            .await
            .map_api_error()
            .await?;
        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("{url}: {e}")))?;

        Ok(body
            .items
            .into_iter()
            .map(|item| ReceiptLine {
                name: item.name,
                price: rubles(item.price),
                quantity: item.quantity,
                total: item.sum.map(rubles),
                budget_category_name: None,
            })
            .collect())
    }
}
