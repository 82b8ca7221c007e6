//! Repository error types for Farmstead
//!
//! Store operations fail with a [`RepositoryError`]; the API boundary
//! converts these into the crate error, preserving the conflict and
//! not-found distinctions the endpoint contract needs.

use thiserror::Error;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query execution error: {0}")]
    QueryExecution(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Conflict (duplicate key)
    #[error("Conflict error: {0}")]
    Conflict(String),

    /// Row decoding error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Check if this is a conflict error (duplicate key, etc.)
    ///
    /// Unique-index violations are the store-level backstop for racing
    /// duplicate inserts that slip past the application checks.
    pub fn is_conflict(&self) -> bool {
        match self {
            RepositoryError::Conflict(_) => true,
            RepositoryError::Database(e) => {
                if let sqlx::Error::Database(db_err) = e {
                    // PostgreSQL unique violation error code is 23505
                    db_err.code().map_or(false, |code| code == "23505")
                } else {
                    false
                }
            },
            _ => false,
        }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RepositoryError::NotFound(_) | RepositoryError::Database(sqlx::Error::RowNotFound)
        )
    }
}

/// Convert repository errors to application errors
impl From<RepositoryError> for crate::error::Error {
    fn from(err: RepositoryError) -> Self {
        if err.is_conflict() {
            return crate::error::Error::Conflict(err.to_string());
        }
        match err {
            RepositoryError::NotFound(msg) => crate::error::Error::NotFound(msg),
            _ => crate::error::Error::database(err.to_string()),
        }
    }
}
