// Gatekeep core
//
// Credential and session-token lifecycle, free of HTTP and storage concerns:
// - CredentialManager: Argon2id hashing and constant-time verification
// - SessionTokenService: HS256 session tokens carrying the user ID
// - Input validation for registration and login
// - AuthError: the error taxonomy shared with the server

pub mod duration;
pub mod error;
pub mod password;
pub mod token;
pub mod user;
pub mod validation;

pub use duration::parse_ttl;
pub use error::{AuthError, Result};
pub use password::{CredentialManager, HashingParams};
pub use token::{SessionClaims, SessionTokenService};
pub use user::User;
pub use validation::{LoginInput, RegisterInput};
