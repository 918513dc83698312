//! Quote abstractions and core types

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Raw upstream sub-object stored under the derived key, passed through untouched.
pub type UpstreamQuote = Value;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// Upstream answered 200 but the derived key was not in the payload.
    #[error("pair not found")]
    PairNotFound { available_pairs: Vec<String> },

    #[error("HTTP error {0}")]
    UpstreamStatus(u16),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected upstream payload: {0}")]
    UnexpectedPayload(String),
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches the upstream sub-object for a pair identifier such as `USD-BRL`.
    async fn fetch_quote(&self, pair: &str) -> Result<UpstreamQuote, QuoteError>;

    /// Checks that the upstream is reachable. Only transport failures are errors.
    async fn probe(&self) -> Result<(), QuoteError>;
}

/// Key the upstream uses for a pair: `USD-BRL` becomes `USDBRL`.
pub fn derived_key(pair: &str) -> String {
    pair.replace('-', "")
}

/// Gateway timestamp in ISO-8601 form.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Reshaped single-pair quote returned by `/api/currency/{pair}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResult {
    pub code: Option<Value>,
    pub codein: Option<Value>,
    pub name: Option<Value>,
    pub high: Option<Value>,
    pub low: Option<Value>,
    #[serde(rename = "varBid")]
    pub var_bid: Option<Value>,
    #[serde(rename = "pctChange")]
    pub pct_change: Option<Value>,
    pub bid: Option<Value>,
    pub ask: Option<Value>,
    pub timestamp: Option<Value>,
    pub create_date: Option<Value>,
    pub currency_pair: String,
    pub fetched_at: String,
}

impl QuoteResult {
    pub fn from_upstream(
        pair: &str,
        raw: &UpstreamQuote,
        fetched_at: String,
    ) -> Result<Self, QuoteError> {
        let fields = raw.as_object().ok_or_else(|| {
            QuoteError::UnexpectedPayload(format!("quote for {pair} is not an object"))
        })?;
        let field = |name: &str| fields.get(name).filter(|v| !v.is_null()).cloned();

        Ok(QuoteResult {
            code: field("code"),
            codein: field("codein"),
            name: field("name"),
            high: field("high"),
            low: field("low"),
            var_bid: field("varBid"),
            pct_change: field("pctChange"),
            bid: field("bid"),
            ask: field("ask"),
            timestamp: field("timestamp"),
            create_date: field("create_date"),
            currency_pair: pair.to_string(),
            fetched_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_derived_key() {
        assert_eq!(derived_key("USD-BRL"), "USDBRL");
        assert_eq!(derived_key("DOGE-BRL"), "DOGEBRL");
        assert_eq!(derived_key("USDBRL"), "USDBRL");
        assert_eq!(derived_key("A-B-C"), "ABC");
    }

    #[test]
    fn test_from_upstream_maps_fields() {
        let raw = json!({
            "code": "USD",
            "codein": "BRL",
            "name": "Dólar Americano/Real Brasileiro",
            "high": "5.4",
            "low": "5.3",
            "varBid": "0.01",
            "pctChange": "0.2",
            "bid": "5.35",
            "ask": "5.36",
            "timestamp": "1700000000",
            "create_date": "2023-11-14 19:13:20",
            "extra": "ignored"
        });

        let result =
            QuoteResult::from_upstream("USD-BRL", &raw, "2024-01-01T00:00:00Z".into()).unwrap();
        assert_eq!(result.code, Some(json!("USD")));
        assert_eq!(result.var_bid, Some(json!("0.01")));
        assert_eq!(result.pct_change, Some(json!("0.2")));
        assert_eq!(result.currency_pair, "USD-BRL");

        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(serialized["varBid"], json!("0.01"));
        assert_eq!(serialized["pctChange"], json!("0.2"));
        assert!(serialized.get("extra").is_none());
    }

    #[test]
    fn test_from_upstream_missing_fields_are_null() {
        let raw = json!({ "code": "BTC", "bid": 350000.5 });
        let result = QuoteResult::from_upstream("BTC-BRL", &raw, timestamp_now()).unwrap();

        assert_eq!(result.bid, Some(json!(350000.5)));
        assert!(result.ask.is_none());

        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(serialized["ask"], Value::Null);
        assert_eq!(serialized["create_date"], Value::Null);
    }

    #[test]
    fn test_from_upstream_rejects_non_object() {
        let result = QuoteResult::from_upstream("USD-BRL", &json!("oops"), timestamp_now());
        assert!(matches!(result, Err(QuoteError::UnexpectedPayload(_))));
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let stamp = timestamp_now();
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn test_error_messages() {
        let not_found = QuoteError::PairNotFound {
            available_pairs: vec!["USDBRL".into()],
        };
        assert_eq!(not_found.to_string(), "pair not found");
        assert_eq!(QuoteError::UpstreamStatus(503).to_string(), "HTTP error 503");
    }
}
