//! # objective-sql
//!
//! Fluent, injection-safe SQL schema and query builders.
//!
//! Two builder families live here:
//!
//! - [`schema::Blueprint`] accumulates one table-level DDL operation
//!   (CREATE, ALTER, RENAME or DROP) as a set of fluent
//!   [`schema::ColumnDefinition`] entries and renders the complete
//!   statement.
//! - [`query::Query`] accumulates one filtered table operation (validated
//!   WHERE predicates, ordering, pagination) and renders a parameterized
//!   SELECT, UPDATE or DELETE.
//!
//! This crate only produces SQL text and structured bind parameters; the
//! `objective-db` crate owns the connection and dispatches them.
//!
//! ## Example
//!
//! ```rust
//! use objective_sql::schema::{Blueprint, Command};
//!
//! let mut table = Blueprint::new();
//! table
//!     .name("products")
//!     .charset_collate("utf8mb4")
//!     .command(Command::Create);
//! table.id("id");
//! table.text("name");
//!
//! let sql = table.get_sql().unwrap();
//! assert!(sql.starts_with("CREATE TABLE products"));
//! ```
//!
//! ```rust
//! use objective_sql::query::{ComparisonOperator, Query};
//!
//! # fn main() -> Result<(), objective_sql::QueryError> {
//! let mut query = Query::new("products");
//! query
//!     .filter("id", ComparisonOperator::Gte, 19)?
//!     .order_by("id", None)
//!     .limit(50);
//!
//! let (sql, params) = query.build_select();
//! assert_eq!(sql, "SELECT * FROM products WHERE id >= ? ORDER BY id ASC LIMIT 50");
//! assert_eq!(params.len(), 1);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod query;
pub mod schema;
mod value;

pub use error::{QueryError, QueryResult, SchemaError, SchemaResult};
pub use value::{SqlValue, ToSqlValue};
