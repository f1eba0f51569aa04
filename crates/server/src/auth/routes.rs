// Authentication HTTP routes
// Decision: Routes are relative; the router nests them under /api/v1
// Decision: Token issuance failures are surfaced as 500, never swallowed

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gatekeep_core::{AuthError, LoginInput, RegisterInput, User};
use uuid::Uuid;

use super::middleware::{AuthState, AuthUser};
use crate::api::{ApiError, ApiResponse, ErrorResponse, MessageResponse};
use crate::storage::{is_duplicate_email, CreateUserRow};

/// Name of the session cookie
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        // Public routes
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        // Protected routes
        .route("/protected/get-user", get(get_current_user))
        .route("/protected/logout", get(logout))
        .with_state(state)
}

/// POST /auth/register - Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterInput,
    responses(
        (status = 201, description = "User created; session cookie set", body = ApiResponse<User>),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AuthState>,
    jar: CookieJar,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<User>>), ApiError> {
    let Json(input) = payload?;
    input.validate()?;

    let credentials = state.credentials.clone();
    let password = input.password;
    let password_hash = run_blocking(move || credentials.hash(&password)).await?;

    let row = state
        .db
        .create_user(CreateUserRow {
            name: input.name,
            email: input.email,
            password_hash,
        })
        .await
        .map_err(|e| {
            if is_duplicate_email(&e) {
                AuthError::Conflict
            } else {
                AuthError::Internal(e.context("failed to create user"))
            }
        })?;

    let user = User::from(row);
    let jar = jar.add(session_cookie(&state, user.id)?);

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::new(
            StatusCode::CREATED,
            user,
            "user created successfully",
        )),
    ))
}

/// POST /auth/login - Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = ApiResponse<User>),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<ApiResponse<User>>), ApiError> {
    let Json(input) = payload?;
    input.validate()?;

    let row = state.db.get_user_by_email(&input.email).await?;

    let credentials = state.credentials.clone();
    let password = input.password;
    let row = match row {
        Some(row) => {
            let stored_hash = row.password_hash.clone();
            run_blocking(move || credentials.verify(&password, &stored_hash)).await?;
            row
        }
        None => {
            // Same cost as a wrong password; always fails
            run_blocking(move || credentials.verify_decoy(&password)).await?;
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let user = User::from(row);
    let jar = jar.add(session_cookie(&state, user.id)?);

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        jar,
        Json(ApiResponse::new(
            StatusCode::OK,
            user,
            "user loggedIn successfully",
        )),
    ))
}

/// GET /protected/get-user - Current user, with a refreshed session cookie
#[utoipa::path(
    get,
    path = "/api/v1/protected/get-user",
    responses(
        (status = 200, description = "Current user; session cookie refreshed", body = ApiResponse<User>),
        (status = 401, description = "Missing, invalid or expired session", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn get_current_user(
    State(state): State<AuthState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<User>>), ApiError> {
    let row = state
        .db
        .get_user(auth.id)
        .await?
        .ok_or(AuthError::NotFound)?;

    let user = User::from(row);
    let jar = jar.add(session_cookie(&state, user.id)?);

    Ok((
        jar,
        Json(ApiResponse::new(
            StatusCode::OK,
            user,
            "user fetched successfully",
        )),
    ))
}

/// GET /protected/logout - Clear the session cookie
///
/// The token itself stays valid until it expires; only the cookie is cleared.
#[utoipa::path(
    get,
    path = "/api/v1/protected/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse),
        (status = 401, description = "Missing, invalid or expired session", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AuthState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    state
        .db
        .get_user(auth.id)
        .await?
        .ok_or(AuthError::NotFound)?;

    let jar = jar.add(cleared_cookie(&state));

    tracing::info!(user_id = %auth.id, "User logged out");

    Ok((
        jar,
        Json(MessageResponse::new(
            StatusCode::OK,
            "user loggedOut successfully",
        )),
    ))
}

/// Helper: Mint a token for the user and wrap it in the session cookie
fn session_cookie(state: &AuthState, user_id: Uuid) -> Result<Cookie<'static>, AuthError> {
    let token = state.tokens.issue(user_id)?;
    let max_age = time::Duration::try_from(state.tokens.ttl()).map_err(AuthError::token_issuance)?;

    Ok(Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build())
}

/// Helper: Empty session cookie that expires immediately
fn cleared_cookie(state: &AuthState) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Helper: Run CPU-heavy credential work off the async workers
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> gatekeep_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Internal(anyhow::Error::new(e)))?;
    Ok(result?)
}
