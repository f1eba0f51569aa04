// Error taxonomy for credential and session handling
// Decision: Credential and token failures carry no detail so callers cannot tell them apart

use thiserror::Error;

/// Result type alias for credential and session operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors raised by the credential manager, the token service and input validation
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request input has the wrong shape or format
    #[error("{0}")]
    Validation(String),

    /// Email is already registered
    #[error("Email already in use")]
    Conflict,

    /// Login failed (unknown email, wrong password or unreadable stored hash)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session token missing, malformed, forged or expired
    #[error("User not authenticated")]
    Unauthenticated,

    /// Identified user no longer exists
    #[error("User not found")]
    NotFound,

    /// Password hashing failed (bad cost parameters or salt generation)
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Session token could not be minted (bad TTL or signing failure)
    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    /// Storage or other unexpected failure
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AuthError::Validation(msg.into())
    }

    /// Create a hashing error
    pub fn hashing(msg: impl std::fmt::Display) -> Self {
        AuthError::Hashing(msg.to_string())
    }

    /// Create a token issuance error
    pub fn token_issuance(msg: impl std::fmt::Display) -> Self {
        AuthError::TokenIssuance(msg.to_string())
    }

    /// Whether this error is a server-side fault rather than a client mistake
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::Hashing(_) | AuthError::TokenIssuance(_) | AuthError::Internal(_)
        )
    }
}
