// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Success envelope: `{"statusCode": 200, "data": ..., "message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// HTTP status code repeated in the body.
    pub status_code: u16,
    /// Payload; omitted when the endpoint has nothing to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable outcome.
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data: Some(data),
            message: message.into(),
        }
    }
}

/// Envelope for endpoints that return no payload: `{"statusCode": 200, "message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    /// HTTP status code repeated in the body.
    pub status_code: u16,
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let response = ApiResponse::new(StatusCode::CREATED, "payload", "user created successfully");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 201);
        assert_eq!(json["data"], "payload");
        assert_eq!(json["message"], "user created successfully");
    }

    #[test]
    fn test_message_response_has_no_data() {
        let response = MessageResponse::new(StatusCode::OK, "user loggedOut successfully");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "statusCode": 200, "message": "user loggedOut successfully" })
        );
    }
}
