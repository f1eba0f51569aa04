// Gatekeep server library
// Decision: Shared library for binaries (API server, OpenAPI export) and integration tests

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

// API types shared by handlers (and OpenAPI generation)
pub mod api;

// Authentication module
pub mod auth;

// Environment configuration
pub mod config;

// OpenAPI spec generation
pub mod openapi;

// Storage layer
pub mod storage;

// Logging setup
pub mod telemetry;

pub use auth::AuthState;
pub use config::ServerConfig;

/// Prefix for every API route
pub const API_PREFIX: &str = "/api/v1";

/// Build the application router.
///
/// Auth and health routes live under [`API_PREFIX`]; the OpenAPI document is
/// served at `/api-doc/openapi.json`. CORS is only added when origins are
/// configured.
pub fn build_router(auth_state: AuthState, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .merge(api::health::routes())
        .merge(auth::routes(auth_state));

    let app = Router::new()
        .nest(API_PREFIX, api_routes)
        .route("/api-doc/openapi.json", get(openapi_json));

    let app = match cors_layer(cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    };

    // Add tracing
    app.layer(TraceLayer::new_for_http())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::ApiDoc::openapi())
}

/// Credentialed CORS for the configured origins; None when nothing valid is configured
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true),
    )
}
