//! HTTP surface of the gateway

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::core::QuoteProvider;

/// Immutable state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn QuoteProvider>,
    /// Upper bound on in-flight upstream calls for one batch request.
    pub batch_concurrency: usize,
}

impl AppState {
    pub fn new(provider: Arc<dyn QuoteProvider>, batch_concurrency: usize) -> Self {
        AppState {
            provider,
            batch_concurrency,
        }
    }
}

pub fn router(state: AppState) -> Router {
    // Browser front-ends call the gateway directly from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/currency/{pair}", get(handlers::currency_quote))
        .route(
            "/api/available-currencies",
            get(handlers::available_currencies),
        )
        .route(
            "/api/multiple-currencies",
            post(handlers::multiple_currencies),
        )
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!(%addr, "Quote gateway listening");

    axum::serve(listener, router(state))
        .await
        .context("Quote gateway server error")
}
