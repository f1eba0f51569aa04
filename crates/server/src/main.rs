// Gatekeep API server
// Decision: Configuration is read once at start-up; a bad secret, expiry or hashing cost aborts boot
// Decision: No DATABASE_URL falls back to in-memory storage with a warning

use anyhow::{Context, Result};
use gatekeep_server::{build_router, storage::StorageBackend, telemetry, AuthState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present; real environment variables take precedence
    dotenvy::dotenv().ok();

    // Configure via RUST_LOG or LOG_LEVEL (default: "gatekeep_server=debug,tower_http=debug")
    telemetry::init_tracing();

    tracing::info!("gatekeep-server starting...");

    let config = ServerConfig::from_env().context("Failed to load configuration")?;

    // Initialize storage
    let db = match config.database_url.as_deref() {
        Some(url) => {
            let db = StorageBackend::postgres(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
            StorageBackend::in_memory()
        }
    };

    let auth_state = AuthState::new(&config, db).context("Invalid authentication settings")?;
    tracing::info!(
        in_memory = auth_state.db.is_dev_mode(),
        ttl_secs = auth_state.tokens.ttl().as_secs(),
        cookie_secure = config.cookie_secure,
        "Authentication configured"
    );

    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }

    let app = build_router(auth_state, &config.cors_origins);

    // Start HTTP server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
