//! Error types for database dispatch.

use objective_sql::{QueryError, SchemaError};

/// Errors surfaced by the database manager.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Driver-level failure from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A blueprint could not be rendered.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A query could not be built.
    #[error("query error: {0}")]
    Query(#[from] QueryError),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DbError>;
