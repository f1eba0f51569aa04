// HTTP mapping for authentication errors
// Decision: Internal failures are logged in full and rendered as a generic 500

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gatekeep_core::AuthError;

use super::common::ErrorResponse;

/// Message for request bodies that are not valid JSON of the expected shape
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input";

/// Message for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error returned by handlers and extractors
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Hashing(_) | AuthError::TokenIssuance(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the client
    pub fn public_message(&self) -> String {
        if self.0.is_internal() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.0.to_string()
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(AuthError::Internal(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection);
        Self(AuthError::validation(INVALID_INPUT_MESSAGE))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_internal() {
            tracing::error!(error = %self.0, "Request failed");
        }
        (status, Json(ErrorResponse::new(self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthError::validation("name is required"), StatusCode::BAD_REQUEST),
            (AuthError::Conflict, StatusCode::CONFLICT),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (AuthError::NotFound, StatusCode::NOT_FOUND),
            (AuthError::hashing("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AuthError::token_issuance("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(
            ApiError(AuthError::InvalidCredentials).public_message(),
            "Invalid credentials"
        );
        assert_eq!(ApiError(AuthError::Conflict).public_message(), "Email already in use");
        assert_eq!(
            ApiError(AuthError::validation("invalid email format")).public_message(),
            "invalid email format"
        );
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let err = ApiError::from(anyhow::anyhow!("connection to 10.0.0.5 refused"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);

        let err = ApiError(AuthError::token_issuance("failed to sign token"));
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
    }
}
