use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::core::QuoteError;

/// Paths listed by the not-found handler.
pub const AVAILABLE_ENDPOINTS: [&str; 4] = [
    "/api/currency/<currency_pair>",
    "/api/available-currencies",
    "/api/multiple-currencies",
    "/api/health",
];

/// JSON body of every error response.
#[derive(Debug, Serialize, Default)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_pairs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<&'static str>>,
}

impl ErrorPayload {
    fn message(error: &str) -> Self {
        ErrorPayload {
            error: error.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("currency list not provided")]
    MissingCurrencies,

    #[error("endpoint not found")]
    EndpointNotFound,

    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_and_payload(self) -> (StatusCode, ErrorPayload) {
        match self {
            ApiError::Quote(QuoteError::PairNotFound { available_pairs }) => (
                StatusCode::NOT_FOUND,
                ErrorPayload {
                    available_pairs: Some(available_pairs),
                    ..ErrorPayload::message("currency pair not found")
                },
            ),
            ApiError::Quote(QuoteError::UpstreamStatus(code)) => (
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                ErrorPayload {
                    status_code: Some(code),
                    ..ErrorPayload::message("failed to fetch quote from upstream API")
                },
            ),
            ApiError::Quote(QuoteError::Transport(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorPayload {
                    details: Some(e.to_string()),
                    ..ErrorPayload::message("failed to connect to upstream API")
                },
            ),
            ApiError::Quote(e) => internal(e.to_string()),
            ApiError::Internal(details) => internal(details),
            ApiError::MissingCurrencies => (
                StatusCode::BAD_REQUEST,
                ErrorPayload::message("currency list not provided"),
            ),
            ApiError::EndpointNotFound => (
                StatusCode::NOT_FOUND,
                ErrorPayload {
                    available_endpoints: Some(AVAILABLE_ENDPOINTS.to_vec()),
                    ..ErrorPayload::message("endpoint not found")
                },
            ),
        }
    }
}

fn internal(details: String) -> (StatusCode, ErrorPayload) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorPayload {
            details: Some(details),
            ..ErrorPayload::message("internal server error")
        },
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, payload) = self.status_and_payload();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %payload.error, details = ?payload.details, "Request failed");
        }
        (status, Json(payload)).into_response()
    }
}
