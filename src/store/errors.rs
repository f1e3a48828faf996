//! Store error types
//!
//! Every failure of the relational store surfaces as a `StoreError`.
//! Callers above the store never see `sqlx::Error` directly.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database URL could not be parsed
    #[error("Invalid database URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// Opening the pool failed
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Creating the schema failed
    #[error("Failed to create schema: {0}")]
    Schema(#[source] sqlx::Error),

    /// A statement, begin, or commit failed
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),
}

impl StoreError {
    /// Stable error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::InvalidUrl { .. } => "QUIZ_STORE_INVALID_URL",
            StoreError::Connect(_) => "QUIZ_STORE_CONNECT_FAILED",
            StoreError::Schema(_) => "QUIZ_STORE_SCHEMA_FAILED",
            StoreError::Query(_) => "QUIZ_STORE_QUERY_FAILED",
        }
    }
}
