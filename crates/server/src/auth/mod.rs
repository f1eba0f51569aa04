// Authentication module
// Decision: Session token travels in an HTTP-only cookie; Bearer header accepted for API clients
// Decision: Registration and login are the only unauthenticated endpoints

pub mod middleware;
pub mod routes;

pub use middleware::{AuthState, AuthUser};
pub use routes::{routes, ACCESS_TOKEN_COOKIE};
