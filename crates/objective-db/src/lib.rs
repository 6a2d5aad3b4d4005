//! # objective-db
//!
//! Database dispatch layer for the `objective-sql` builders.
//!
//! [`DatabaseManager`] is the sole surface other subsystems call into: it
//! owns the sqlx pool, supplies the table prefix and charset metadata to the
//! builders, and routes every rendered statement through its `sql`/`select`
//! chokepoints.
//!
//! ## Example
//!
//! ```ignore
//! use objective_db::DatabaseManager;
//! use objective_sql::query::ComparisonOperator;
//! use objective_sql::SqlValue;
//!
//! let db = DatabaseManager::new(pool).with_prefix("wp_");
//!
//! db.create_table("products", |table| {
//!     table.integer("id");
//!     table.text("name");
//! })
//! .await?;
//!
//! db.insert("products", &[
//!     ("id", SqlValue::Int(1)),
//!     ("name", SqlValue::Text("My New Product".into())),
//! ])
//! .await?;
//!
//! let rows = db
//!     .query("products")
//!     .filter("id", ComparisonOperator::Gte, 1)?
//!     .limit(50)
//!     .get()
//!     .await?;
//! ```

mod error;
mod manager;
mod query;

pub use error::{DbError, Result};
pub use manager::DatabaseManager;
pub use query::TableQuery;

// Re-export the builder crate so callers need only one dependency.
pub use objective_sql;
