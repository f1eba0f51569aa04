// Storage layer for Gatekeep users
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
// Decision: Email uniqueness is enforced by the store itself, never by a read-then-write check

pub mod backend;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;

use thiserror::Error;

/// Returned inside `anyhow::Error` when an insert hits an existing email
#[derive(Debug, Error)]
#[error("email already registered")]
pub struct DuplicateEmail;

/// Whether a storage error was caused by a duplicate email
pub fn is_duplicate_email(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DuplicateEmail>().is_some()
}
