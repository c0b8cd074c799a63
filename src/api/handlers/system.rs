//! System endpoints: health check.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Liveness report for load balancers and deploy checks.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    service: String,
    version: String,
    checked_at: DateTime<Utc>,
}

/// `GET /health`: Reports that the booking API is up.
///
/// Does not touch the store or the payment processor.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Liveness check",
    description = "Reports that the booking API process is serving requests, with its crate version.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    let report = HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checked_at: Utc::now(),
    };
    (StatusCode::OK, Json(report))
}

/// Routes served outside the `/api` prefix.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
