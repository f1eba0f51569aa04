// Tracing initialization
//
// Console logging through tracing-subscriber with an env-driven filter.
// RUST_LOG wins over LOG_LEVEL; both fall back to DEFAULT_LOG_FILTER.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when neither RUST_LOG nor LOG_LEVEL is set
pub const DEFAULT_LOG_FILTER: &str = "gatekeep_server=debug,tower_http=debug";

/// Resolve the log filter directive from the environment lookup
pub fn log_filter<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("RUST_LOG")
        .or_else(|| lookup("LOG_LEVEL"))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_tracing() {
    let directive = log_filter(|key| std::env::var(key).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(filter),
        )
        .init();

    tracing::debug!(filter = %directive, "Tracing initialized");
}
