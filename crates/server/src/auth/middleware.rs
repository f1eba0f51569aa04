// Authentication state and extractors
// Decision: Support both cookie-based (browser) and header-based (API) tokens
// Decision: Every token failure renders the same 401

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;
use gatekeep_core::{AuthError, CredentialManager, SessionTokenService};
use uuid::Uuid;

use super::routes::ACCESS_TOKEN_COOKIE;
use crate::api::ApiError;
use crate::config::ServerConfig;
use crate::storage::StorageBackend;

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub credentials: Arc<CredentialManager>,
    pub tokens: Arc<SessionTokenService>,
    pub db: Arc<StorageBackend>,
    pub cookie_secure: bool,
}

impl AuthState {
    /// Build the shared state from configuration and an opened storage backend.
    ///
    /// Fails when the hashing parameters or token settings are unusable, so a
    /// misconfigured server never starts.
    pub fn new(config: &ServerConfig, db: StorageBackend) -> gatekeep_core::Result<Self> {
        let credentials = CredentialManager::new(config.hashing)?;
        let tokens = SessionTokenService::new(&config.token.secret, config.token.ttl)?;

        Ok(Self {
            credentials: Arc::new(credentials),
            tokens: Arc::new(tokens),
            db: Arc::new(db),
            cookie_secure: config.cookie_secure,
        })
    }
}

/// Authenticated user extracted from the session token.
/// Returns 401 if the token is missing or invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// User ID from the token subject
    pub id: Uuid,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = extract_token(&parts.headers).ok_or_else(|| {
            tracing::debug!("No session token on request");
            ApiError(AuthError::Unauthenticated)
        })?;

        let id = auth_state.tokens.verify(&token)?;
        Ok(AuthUser { id })
    }
}

/// Find the session token: cookie first, then `Authorization: Bearer`
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
