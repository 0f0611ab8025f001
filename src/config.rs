//! Endpoint Configuration
//!
//! Resource URLs are fixed at build time:
//!
//! ```bash
//! PANTRY_API_BASE=https://pantry.example.org trunk build --release
//! PANTRY_RECEIPT_LOOKUP_URL=https://receipts.example.org/check trunk build
//! ```
//!
//! `PANTRY_API_BASE` sets the base of all five resources; `PANTRY_STORAGE_URL`,
//! `PANTRY_SHOPPING_URL`, `PANTRY_BUDGET_URL`, `PANTRY_MENU_URL` and
//! `PANTRY_RECEIPTS_URL` override single resources.

const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Absolute URLs of the remote resources
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub storage: String,
    pub shopping: String,
    pub budget: String,
    pub menu: String,
    pub receipts: String,
    /// Fiscal receipt lookup service
    pub receipt_lookup: String,
}

impl Endpoints {
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            storage: format!("{base}/storage"),
            shopping: format!("{base}/shopping"),
            budget: format!("{base}/budget"),
            menu: format!("{base}/menu"),
            receipts: format!("{base}/receipts"),
            receipt_lookup: format!("{base}/receipt-lookup"),
        }
    }

    pub fn from_env() -> Self {
        let mut endpoints = Self::with_base(option_env!("PANTRY_API_BASE").unwrap_or(DEFAULT_API_BASE));
        let overrides = [
            (&mut endpoints.storage, option_env!("PANTRY_STORAGE_URL")),
            (&mut endpoints.shopping, option_env!("PANTRY_SHOPPING_URL")),
            (&mut endpoints.budget, option_env!("PANTRY_BUDGET_URL")),
            (&mut endpoints.menu, option_env!("PANTRY_MENU_URL")),
            (&mut endpoints.receipts, option_env!("PANTRY_RECEIPTS_URL")),
            (&mut endpoints.receipt_lookup, option_env!("PANTRY_RECEIPT_LOOKUP_URL")),
        ];
        for (slot, value) in overrides {
            if let Some(url) = value.filter(|url| !url.is_empty()) {
                *slot = url.to_string();
            }
        }
        endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_strips_trailing_slash() {
        let endpoints = Endpoints::with_base("http://127.0.0.1:9000/");
        assert_eq!(endpoints.storage, "http://127.0.0.1:9000/storage");
        assert_eq!(endpoints.receipts, "http://127.0.0.1:9000/receipts");
    }
}
