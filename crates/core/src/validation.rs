// Request input validation for registration and login
//
// Rules: name non-empty, email matches a conventional address shape,
// password at least MIN_PASSWORD_CHARS characters (counted as Unicode scalars).

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::{AuthError, Result};

/// Minimum password length in characters
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Message returned for any invalid login input.
/// Kept generic so it does not hint at which field was wrong.
pub const LOGIN_INPUT_ERROR: &str = "both email and password are required";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static regex")
});

/// Check an email address against the accepted format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn password_long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
}

/// Registration request body
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RegisterInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterInput {
    /// Validate the registration fields, reporting the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(AuthError::validation("name is required"));
        }
        if !is_valid_email(&self.email) {
            return Err(AuthError::validation("invalid email format"));
        }
        if !password_long_enough(&self.password) {
            return Err(AuthError::validation(format!(
                "password must be at least {} characters long",
                MIN_PASSWORD_CHARS
            )));
        }
        Ok(())
    }
}

/// Login request body
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginInput {
    /// Validate the login fields
    pub fn validate(&self) -> Result<()> {
        if !is_valid_email(&self.email) || !password_long_enough(&self.password) {
            return Err(AuthError::validation(LOGIN_INPUT_ERROR));
        }
        Ok(())
    }
}
