// OpenAPI specification generation
//
// Served by the API server at /api-doc/openapi.json and printed by the
// export-openapi binary for static documentation builds.

use crate::api::{self, ApiResponse, ErrorResponse, MessageResponse};
use crate::auth;
use gatekeep_core::{LoginInput, RegisterInput, User};
use utoipa::OpenApi;

/// OpenAPI documentation for the Gatekeep API
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::routes::register,
        auth::routes::login,
        auth::routes::get_current_user,
        auth::routes::logout,
        api::health::health,
    ),
    components(
        schemas(
            RegisterInput,
            LoginInput,
            User,
            ApiResponse<User>,
            MessageResponse,
            ErrorResponse,
            api::health::HealthResponse,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and session endpoints"),
        (name = "health", description = "Liveness probe")
    ),
    info(
        title = "Gatekeep API",
        version = "0.1.0",
        description = "Email and password authentication with cookie-based session tokens",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> serde_json::Result<String> {
        Self::openapi().to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_all_routes() {
        let json: serde_json::Value = serde_json::from_str(&ApiDoc::to_json().unwrap()).unwrap();
        let paths = json["paths"].as_object().unwrap();

        for path in [
            "/api/v1/auth/register",
            "/api/v1/auth/login",
            "/api/v1/protected/get-user",
            "/api/v1/protected/logout",
            "/api/v1/health-check",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
        assert!(json["paths"]["/api/v1/auth/register"]["post"].is_object());
        assert!(json["paths"]["/api/v1/protected/logout"]["get"].is_object());
    }

    #[test]
    fn test_logout_documents_message_only_body() {
        let json: serde_json::Value = serde_json::from_str(&ApiDoc::to_json().unwrap()).unwrap();
        let schema = &json["paths"]["/api/v1/protected/logout"]["get"]["responses"]["200"]
            ["content"]["application/json"]["schema"]["$ref"];
        assert_eq!(schema, "#/components/schemas/MessageResponse");

        let props = json["components"]["schemas"]["MessageResponse"]["properties"]
            .as_object()
            .unwrap();
        assert!(props.contains_key("statusCode"));
        assert!(props.contains_key("message"));
        assert!(!props.contains_key("data"));
    }

    #[test]
    fn test_user_schema_has_no_password() {
        let json: serde_json::Value = serde_json::from_str(&ApiDoc::to_json().unwrap()).unwrap();
        let props = json["components"]["schemas"]["User"]["properties"]
            .as_object()
            .unwrap();
        assert!(props.contains_key("email"));
        assert!(!props.contains_key("password"));
        assert!(!props.contains_key("password_hash"));
    }
}
