//! Custom error types for the common library
//!
//! This module defines the storage error type shared by every repository
//! implementation in the workspace.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// SQLSTATE code PostgreSQL reports for a unique constraint violation
const UNIQUE_VIOLATION: &str = "23505";

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A unique constraint rejected the write; carries the offending column
    #[error("Unique constraint violated on {0}")]
    Conflict(String),
}

impl DatabaseError {
    /// Classify a query failure, turning unique violations into `Conflict`
    pub fn from_query(err: SqlxError, column: &str) -> Self {
        if is_unique_violation(&err) {
            DatabaseError::Conflict(column.to_string())
        } else {
            DatabaseError::Query(err)
        }
    }
}

/// Check if an error is a unique constraint violation
pub fn is_unique_violation(err: &SqlxError) -> bool {
    match err {
        SqlxError::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
