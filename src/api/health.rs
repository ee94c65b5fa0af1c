//! Liveness probe endpoint.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

pub const HEALTHY: &str = "healthy";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /health` — always returns 200 OK with `{"status": "healthy"}`.
///
/// No dependencies and never blocks, so it is safe to use as a Docker /
/// Kubernetes liveness probe (see `hello-service --healthcheck`).
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: HEALTHY }))
}
