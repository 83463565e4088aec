//! Repository-level error types.

use thiserror::Error;

/// Errors surfaced by the persistence adapter.
///
/// Every adapter call is its own transaction; a failure here means that
/// single transaction did not commit.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
