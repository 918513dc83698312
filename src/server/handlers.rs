use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::AppState;
use super::error::ApiError;
use crate::core::quote::timestamp_now;
use crate::core::{Catalog, QuoteResult, UpstreamQuote};

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub currencies: Option<Vec<String>>,
}

impl BatchRequest {
    /// Parses a batch body, which must be a JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| ApiError::Internal(e.to_string()))?;
        if !value.is_object() {
            return Err(ApiError::Internal("request body must be a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| ApiError::Internal(e.to_string()))
    }
}

/// Per-pair outcome of a batch lookup.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Quote(UpstreamQuote),
    Error { error: String },
}

#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub results: BTreeMap<String, BatchEntry>,
    pub fetched_at: String,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

pub async fn currency_quote(
    State(state): State<AppState>,
    Path(pair): Path<String>,
) -> Result<Json<QuoteResult>, ApiError> {
    let raw = state.provider.fetch_quote(&pair).await?;
    let result = QuoteResult::from_upstream(&pair, &raw, timestamp_now())?;
    debug!(pair = %pair, "Served quote");
    Ok(Json(result))
}

pub async fn available_currencies(State(state): State<AppState>) -> Result<Json<Catalog>, ApiError> {
    // The probe result is discarded: the catalog is static whatever upstream says.
    state.provider.probe().await?;
    Ok(Json(Catalog::available()))
}

pub async fn multiple_currencies(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BatchResult>, ApiError> {
    let request = BatchRequest::from_body(&body)?;
    let pairs = request.currencies.unwrap_or_default();
    if pairs.is_empty() {
        return Err(ApiError::MissingCurrencies);
    }

    info!(count = pairs.len(), "Fetching batch quotes");
    let provider = &state.provider;
    let entries: Vec<(String, BatchEntry)> = stream::iter(pairs)
        .map(|pair| async move {
            let entry = match provider.fetch_quote(&pair).await {
                Ok(quote) => BatchEntry::Quote(quote),
                Err(e) => BatchEntry::Error {
                    error: e.to_string(),
                },
            };
            (pair, entry)
        })
        .buffered(state.batch_concurrency.max(1))
        .collect()
        .await;

    Ok(Json(BatchResult {
        results: entries.into_iter().collect(),
        fetched_at: timestamp_now(),
    }))
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK",
        message: "Quote gateway is running",
        timestamp: timestamp_now(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::EndpointNotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_request_from_object() {
        let request =
            BatchRequest::from_body(br#"{"currencies": ["USD-BRL", "EUR-BRL"]}"#).unwrap();
        assert_eq!(
            request.currencies,
            Some(vec!["USD-BRL".to_string(), "EUR-BRL".to_string()])
        );

        let request = BatchRequest::from_body(b"{}").unwrap();
        assert!(request.currencies.is_none());
    }

    #[test]
    fn test_batch_request_rejects_non_object() {
        let bodies: [&[u8]; 4] = [b"[]", br#"[["USD-BRL"]]"#, b"\"USD-BRL\"", b"null"];
        for body in bodies {
            let result = BatchRequest::from_body(body);
            assert!(
                matches!(result, Err(ApiError::Internal(_))),
                "body: {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_batch_request_rejects_wrong_field_shape() {
        let result = BatchRequest::from_body(br#"{"currencies": "USD-BRL"}"#);
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }
}
