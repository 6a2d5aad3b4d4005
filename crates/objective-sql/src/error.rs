//! Error types for the schema and query builders.

use crate::query::ComparisonOperator;

/// Errors raised while rendering a table blueprint.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The blueprint was rendered before a DDL command was set.
    #[error("no DDL command set on blueprint for table '{table}'")]
    MissingCommand {
        /// The table the blueprint targets.
        table: String,
    },

    /// A RENAME blueprint is missing the new table name.
    #[error("no new name set for renaming table '{table}'")]
    MissingNewName {
        /// The table being renamed.
        table: String,
    },
}

/// Errors raised while building a query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The operator is not valid for the supplied value type.
    #[error("invalid operator '{operator}' for the value given in WHERE clause on column '{column}'")]
    InvalidOperator {
        /// The column the clause filters on.
        column: String,
        /// The offending operator.
        operator: ComparisonOperator,
    },

    /// An operator token could not be parsed.
    #[error("unknown comparison operator: '{0}'")]
    UnknownOperator(String),

    /// A boolean relation token could not be parsed.
    #[error("unknown boolean relation: '{0}'")]
    UnknownRelation(String),

    /// An order token could not be parsed.
    #[error("unknown order direction: '{0}'")]
    UnknownOrder(String),
}

/// Result type for schema operations.
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// Result type for query-building operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
