// Health check

use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
}

/// Create health routes
pub fn routes<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/health-check", get(health))
}

/// GET /health-check - Liveness probe
#[utoipa::path(
    get,
    path = "/api/v1/health-check",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "server is healthy".to_string(),
    })
}
