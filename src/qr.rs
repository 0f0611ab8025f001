//! Fiscal Receipt QR Codes
//!
//! A receipt QR code carries a query string such as
//! `t=20240115T1830&s=1234.50&fn=9999078900004792&i=12345&fp=3522207165&n=1`.

use chrono::NaiveDateTime;
use percent_encoding::percent_decode_str;

use crate::api::ApiError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("QR code is missing '{0}'")]
    MissingField(&'static str),
    #[error("invalid '{field}' in QR code: {value}")]
    InvalidField { field: &'static str, value: String },
    #[error("camera unavailable: {0}")]
    Camera(String),
    #[error("scanner failed: {0}")]
    Scanner(String),
    #[error("receipt lookup failed: {0}")]
    Lookup(#[from] ApiError),
}

/// Decoded fiscal attributes of a receipt
#[derive(Debug, Clone, PartialEq)]
pub struct FiscalQr {
    /// The code as scanned
    pub raw: String,
    pub timestamp: NaiveDateTime,
    /// Receipt total, rubles
    pub sum: f64,
    /// Fiscal drive number (`fn`)
    pub fiscal_drive: String,
    /// Fiscal document number (`i`)
    pub document: String,
    /// Fiscal sign (`fp`)
    pub fiscal_sign: String,
    /// Operation type (`n`)
    pub operation: String,
}

impl FiscalQr {
    /// Accepts a bare query string, one with a leading `?`, or a full URL
    pub fn parse(code: &str) -> Result<Self, ScanError> {
        let raw = code.trim();
        let query = match raw.split_once('?') {
            Some((_, query)) => query,
            None => raw,
        };
        let pairs: Vec<(String, String)> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();
        let field = |name: &'static str| -> Result<String, ScanError> {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ScanError::MissingField(name))
        };

        let t = field("t")?;
        let s = field("s")?;
        let qr = Self {
            raw: raw.to_string(),
            timestamp: parse_timestamp(&t).ok_or(ScanError::InvalidField { field: "t", value: t.clone() })?,
            sum: s
                .parse::<f64>()
                .ok()
                .filter(|sum| sum.is_finite() && *sum >= 0.0)
                .ok_or(ScanError::InvalidField { field: "s", value: s.clone() })?,
            fiscal_drive: field("fn")?,
            document: field("i")?,
            fiscal_sign: field("fp")?,
            operation: field("n")?,
        };
        Ok(qr)
    }

    /// Query parameters for the receipt lookup service
    pub fn lookup_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fn", self.fiscal_drive.clone()),
            ("i", self.document.clone()),
            ("fp", self.fiscal_sign.clone()),
            ("t", self.timestamp.format("%Y%m%dT%H%M%S").to_string()),
            ("s", format!("{:.2}", self.sum)),
            ("n", self.operation.clone()),
        ]
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    ["%Y%m%dT%H%M%S", "%Y%m%dT%H%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    const CODE: &str = "t=20240115T1830&s=1234.50&fn=9999078900004792&i=12345&fp=3522207165&n=1";

    #[test]
    fn test_parse_fiscal_code() {
        let qr = FiscalQr::parse(CODE).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(18, 30, 0).unwrap();
        assert_eq!(qr.timestamp, expected);
        assert_eq!(qr.sum, 1234.5);
        assert_eq!(qr.fiscal_drive, "9999078900004792");
        assert_eq!(qr.document, "12345");
        assert_eq!(qr.fiscal_sign, "3522207165");
        assert_eq!(qr.operation, "1");
        assert_eq!(qr.raw, CODE);
    }

    #[test]
    fn test_parse_accepts_url_and_seconds() {
        let qr = FiscalQr::parse("https://check.example/?t=20240115T183005&s=10&fn=1&i=2&fp=3&n=1").unwrap();
        assert_eq!(qr.timestamp.second(), 5);
        assert_eq!(qr.sum, 10.0);
    }

    #[test]
    fn test_parse_rejects_missing_and_malformed() {
        assert_eq!(
            FiscalQr::parse("t=20240115T1830&s=12&fn=1&i=2&n=1"),
            Err(ScanError::MissingField("fp"))
        );
        assert!(matches!(
            FiscalQr::parse("t=yesterday&s=12&fn=1&i=2&fp=3&n=1"),
            Err(ScanError::InvalidField { field: "t", .. })
        ));
        assert!(matches!(
            FiscalQr::parse("t=20240115T1830&s=12,50&fn=1&i=2&fp=3&n=1"),
            Err(ScanError::InvalidField { field: "s", .. })
        ));
    }

    #[test]
    fn test_lookup_query_round_trips_fields() {
        let qr = FiscalQr::parse(CODE).unwrap();
        let query = qr.lookup_query();
        assert!(query.contains(&("t", "20240115T183000".to_string())));
        assert!(query.contains(&("s", "1234.50".to_string())));
    }
}
