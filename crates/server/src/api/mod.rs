// Public API building blocks
// Decision: Every response uses the same envelope; errors carry only a public message

pub mod common;
pub mod error;
pub mod health;

pub use common::{ApiResponse, ErrorResponse, MessageResponse};
pub use error::ApiError;
