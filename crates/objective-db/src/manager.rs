//! The database manager.
//!
//! [`DatabaseManager`] owns the connection pool and is the only component
//! that talks to the driver. Every DDL and DML helper builds a blueprint or
//! query, renders it, and routes the text through the [`sql`], [`execute`]
//! or [`select`] chokepoints — nothing dispatches independently.
//!
//! [`sql`]: DatabaseManager::sql
//! [`execute`]: DatabaseManager::execute
//! [`select`]: DatabaseManager::select

use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use tracing::debug;

use objective_sql::query::Query;
use objective_sql::schema::{Blueprint, Command};
use objective_sql::SqlValue;

use crate::error::Result;
use crate::query::TableQuery;

/// Facade over the live database connection.
///
/// Carries the collaborator-supplied metadata the builders need: the table
/// name prefix and the charset/collation string appended to CREATE
/// statements.
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    pool: SqlitePool,
    prefix: String,
    charset_collate: String,
}

impl DatabaseManager {
    /// Creates a manager over the given pool with no prefix and no charset.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            prefix: String::new(),
            charset_collate: String::new(),
        }
    }

    /// Sets the prefix applied to every table name.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the charset/collation string appended to CREATE statements.
    #[must_use]
    pub fn with_charset_collate(mut self, charset: impl Into<String>) -> Self {
        self.charset_collate = charset.into();
        self
    }

    /// Returns the prefixed form of a table name.
    #[must_use]
    pub fn prefixed(&self, table: &str) -> String {
        format!("{}{table}", self.prefix)
    }

    // -------------------------------------------------------------------
    // DDL
    // -------------------------------------------------------------------

    /// Creates a table. The closure receives a fresh [`Blueprint`] to
    /// define columns on; the manager supplies the prefixed name, charset
    /// and command after the closure returns.
    ///
    /// # Errors
    ///
    /// Fails when the blueprint cannot render or the driver rejects the
    /// statement.
    pub async fn create_table(
        &self,
        name: &str,
        configure: impl FnOnce(&mut Blueprint),
    ) -> Result<()> {
        let mut schema = Blueprint::new();
        configure(&mut schema);
        schema
            .name(self.prefixed(name))
            .charset_collate(self.charset_collate.clone())
            .command(Command::Create);

        self.sql(&schema.get_sql()?).await?;
        Ok(())
    }

    /// Alters a table. The closure tags column entries with their ALTER
    /// sub-operations via [`Blueprint::create`], [`Blueprint::alter`],
    /// [`Blueprint::rename`] and [`Blueprint::drop`].
    ///
    /// # Errors
    ///
    /// Fails when the blueprint cannot render or the driver rejects the
    /// statement.
    pub async fn alter_table(
        &self,
        name: &str,
        configure: impl FnOnce(&mut Blueprint),
    ) -> Result<()> {
        let mut schema = Blueprint::new();
        configure(&mut schema);
        schema.name(self.prefixed(name)).command(Command::Alter);

        let sql = schema.get_sql()?;
        // An alter with no column entries renders nothing.
        if !sql.is_empty() {
            self.sql(&sql).await?;
        }
        Ok(())
    }

    /// Renames a table.
    ///
    /// # Errors
    ///
    /// Fails when the driver rejects the statement.
    pub async fn rename_table(&self, name: &str, new_name: &str) -> Result<()> {
        let mut schema = Blueprint::new();
        schema
            .name(self.prefixed(name))
            .new_name(self.prefixed(new_name))
            .command(Command::Rename);

        self.sql(&schema.get_sql()?).await?;
        Ok(())
    }

    /// Drops a table.
    ///
    /// # Errors
    ///
    /// Fails when the driver rejects the statement.
    pub async fn drop_table(&self, name: &str) -> Result<()> {
        let mut schema = Blueprint::new();
        schema.name(self.prefixed(name)).command(Command::Drop);

        self.sql(&schema.get_sql()?).await?;
        Ok(())
    }

    // -------------------------------------------------------------------
    // DML
    // -------------------------------------------------------------------

    /// Inserts one row, returning the number of rows affected.
    ///
    /// # Errors
    ///
    /// Fails when the driver rejects the statement.
    pub async fn insert(&self, table: &str, row: &[(&str, SqlValue)]) -> Result<u64> {
        let columns: Vec<&str> = row.iter().map(|(column, _)| *column).collect();
        let placeholders: Vec<&str> = row.iter().map(|_| "?").collect();
        let params: Vec<SqlValue> = row.iter().map(|(_, value)| value.clone()).collect();

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.prefixed(table),
            columns.join(", "),
            placeholders.join(", ")
        );

        self.execute(&sql, params).await
    }

    /// Begins a query against a table, bound to this manager for dispatch.
    #[must_use]
    pub fn query(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, Query::new(self.prefixed(table)))
    }

    // -------------------------------------------------------------------
    // Chokepoints
    // -------------------------------------------------------------------

    /// Runs a parameterless statement (the DDL path), returning rows
    /// affected.
    ///
    /// # Errors
    ///
    /// Fails when the driver rejects the statement.
    pub async fn sql(&self, statement: &str) -> Result<u64> {
        self.execute(statement, Vec::new()).await
    }

    /// Runs a statement with bound parameters, returning rows affected.
    ///
    /// # Errors
    ///
    /// Fails when the driver rejects the statement.
    pub async fn execute(&self, statement: &str, params: Vec<SqlValue>) -> Result<u64> {
        debug!(sql = %statement, "executing statement");

        let mut query = sqlx::query(statement);
        for param in params {
            query = bind_param(query, param);
        }

        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Runs a SELECT with bound parameters, returning the matched rows.
    ///
    /// # Errors
    ///
    /// Fails when the driver rejects the statement.
    pub async fn select(&self, statement: &str, params: Vec<SqlValue>) -> Result<Vec<SqliteRow>> {
        debug!(sql = %statement, "running select");

        let mut query = sqlx::query(statement);
        for param in params {
            query = bind_param(query, param);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

/// Binds a `SqlValue` parameter to a query. Lists flatten into one bind per
/// element, matching the placeholders the builders emit.
fn bind_param<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
        SqlValue::DateTime(dt) => query.bind(dt),
        SqlValue::List(values) => {
            let mut query = query;
            for value in values {
                query = bind_param(query, value);
            }
            query
        }
    }
}
