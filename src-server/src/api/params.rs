//! Query and body helpers shared by every resource.
//!
//! Resources are addressed by one path each and discriminate operations
//! through the `action` query parameter, so parameters are read leniently
//! and converted with resource-specific error messages.

use std::collections::HashMap;

use axum::body::Bytes;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Raw query string parameters of a resource request
#[derive(Debug, Default)]
pub struct ActionQuery(pub HashMap<String, String>);

impl ActionQuery {
    pub fn action(&self) -> Option<&str> {
        self.0.get("action").map(String::as_str).filter(|a| !a.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Integer id under `key`, if present
    pub fn id(&self, key: &str) -> Result<Option<i64>, ApiError> {
        self.get(key)
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| ApiError::BadRequest(format!("{key} must be an integer, got '{raw}'")))
            })
            .transpose()
    }

    pub fn require_id(&self, key: &str) -> Result<i64, ApiError> {
        self.id(key)?.ok_or_else(|| ApiError::BadRequest(format!("{key} is required")))
    }

    /// `YYYY-MM-DD` date under `key`, if present
    pub fn date(&self, key: &str) -> Result<Option<NaiveDate>, ApiError> {
        self.get(key)
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| ApiError::BadRequest(format!("{key} must be a YYYY-MM-DD date, got '{raw}'")))
            })
            .transpose()
    }
}

/// Parse a JSON body; an empty body reads as `{}`
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) { b"{}" } else { body };
    serde_json::from_slice(raw).map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> ActionQuery {
        ActionQuery(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn test_id_parsing() {
        let q = query(&[("id", "12"), ("productId", "x"), ("action", "")]);
        assert_eq!(q.id("id").unwrap(), Some(12));
        assert!(matches!(q.id("productId"), Err(ApiError::BadRequest(_))));
        assert!(q.require_id("recipe_id").is_err());
        assert_eq!(q.action(), None);
    }

    #[test]
    fn test_date_parsing() {
        let q = query(&[("start_date", "2024-03-01"), ("end_date", "01.03.2024")]);
        assert_eq!(q.date("start_date").unwrap(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(q.date("end_date").is_err());
        assert_eq!(q.date("missing").unwrap(), None);
    }

    #[test]
    fn test_empty_body_reads_as_object() {
        #[derive(serde::Deserialize)]
        struct Opt {
            #[serde(default)]
            flag: bool,
        }
        let parsed: Opt = parse_body(&Bytes::from_static(b"")).unwrap();
        assert!(!parsed.flag);
        assert!(parse_body::<Opt>(&Bytes::from_static(b"{not json")).is_err());
    }
}
