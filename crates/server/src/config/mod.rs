// Server configuration loaded from environment variables.
// Decision: Token secret is mandatory; everything else has a development default
// Decision: No DATABASE_URL means in-memory storage (dev mode)

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use gatekeep_core::{parse_ttl, HashingParams};

/// Default token lifetime when ACCESS_TOKEN_EXPIRY is unset
pub const DEFAULT_TOKEN_EXPIRY: &str = "1h";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8000;

/// Session token configuration
#[derive(Clone)]
pub struct TokenConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime
    pub ttl: Duration,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// PostgreSQL URL; None selects in-memory storage
    pub database_url: Option<String>,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,
    /// Whether the session cookie carries the Secure attribute
    pub cookie_secure: bool,
    /// Session token configuration
    pub token: TokenConfig,
    /// Argon2 cost parameters
    pub hashing: HashingParams,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret = get("ACCESS_TOKEN_SECRET")
            .ok_or_else(|| anyhow!("ACCESS_TOKEN_SECRET environment variable required"))?;

        let expiry = get("ACCESS_TOKEN_EXPIRY").unwrap_or_else(|| DEFAULT_TOKEN_EXPIRY.to_string());
        let ttl = parse_ttl(&expiry).context("Invalid ACCESS_TOKEN_EXPIRY")?;

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let cors_origins = get("CORS_ORIGIN")
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cookie_secure = get("COOKIE_SECURE")
            .map(|s| s.to_lowercase() == "true" || s == "1")
            .unwrap_or(false);

        let defaults = HashingParams::default();
        let hashing = HashingParams {
            memory_kib: parse_u32(&get, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_u32(&get, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_u32(&get, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };

        Ok(Self {
            port,
            database_url: get("DATABASE_URL"),
            cors_origins,
            cookie_secure,
            token: TokenConfig { secret, ttl },
            hashing,
        })
    }

    /// Check if storage is in-memory
    pub fn is_dev_mode(&self) -> bool {
        self.database_url.is_none()
    }
}

fn parse_u32<G>(get: &G, key: &str, default: u32) -> Result<u32>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(value) => Ok(value),
            Err(e) => bail!("Invalid {} {:?}: {}", key, raw, e),
        },
        None => Ok(default),
    }
}
