pub mod employees;
pub mod error;

use crate::app::Handlers;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

pub use error::{ApiError, ErrorResponse};

/// Shared by every route.
#[derive(Clone)]
pub struct AppState {
    pub handlers: Arc<Handlers>,
    /// `None` when metrics are disabled; `/metrics` then answers 404.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(handlers: Handlers, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            handlers: Arc::new(handlers),
            metrics,
        }
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "employee-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus text exposition
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
