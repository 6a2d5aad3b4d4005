//! Manager-bound queries.
//!
//! A [`TableQuery`] wraps the pure [`Query`] builder together with the
//! manager that will dispatch it. The fluent surface delegates to the
//! builder; the terminal operations render once and route through the
//! manager's chokepoints.

use sqlx::sqlite::SqliteRow;

use objective_sql::query::{ComparisonOperator, Order, Query, WhereGroup};
use objective_sql::{QueryResult, SqlValue, ToSqlValue};

use crate::error::Result;
use crate::manager::DatabaseManager;

/// A query bound to a [`DatabaseManager`] for eventual dispatch.
#[derive(Debug)]
pub struct TableQuery<'m> {
    manager: &'m DatabaseManager,
    query: Query,
}

impl<'m> TableQuery<'m> {
    pub(crate) fn new(manager: &'m DatabaseManager, query: Query) -> Self {
        Self { manager, query }
    }

    /// Returns the underlying builder.
    #[must_use]
    pub fn as_query(&self) -> &Query {
        &self.query
    }

    // -------------------------------------------------------------------
    // Fluent surface, delegating to the builder
    // -------------------------------------------------------------------

    /// Adds a WHERE clause.
    ///
    /// # Errors
    ///
    /// Fails fast when the operator and value type are incompatible.
    pub fn filter(
        mut self,
        column: &str,
        operator: ComparisonOperator,
        value: impl ToSqlValue,
    ) -> Result<Self> {
        self.query.filter(column, operator, value)?;
        Ok(self)
    }

    /// Adds a negated WHERE clause.
    ///
    /// # Errors
    ///
    /// Same validation as [`TableQuery::filter`].
    pub fn filter_not(
        mut self,
        column: &str,
        operator: ComparisonOperator,
        value: impl ToSqlValue,
    ) -> Result<Self> {
        self.query.filter_not(column, operator, value)?;
        Ok(self)
    }

    /// Adds a WHERE IN clause.
    ///
    /// # Errors
    ///
    /// Same validation as [`TableQuery::filter`].
    pub fn filter_in<V: ToSqlValue>(mut self, column: &str, values: Vec<V>) -> Result<Self> {
        self.query.filter_in(column, values)?;
        Ok(self)
    }

    /// Adds a WHERE NOT IN clause.
    ///
    /// # Errors
    ///
    /// Same validation as [`TableQuery::filter`].
    pub fn filter_not_in<V: ToSqlValue>(mut self, column: &str, values: Vec<V>) -> Result<Self> {
        self.query.filter_not_in(column, values)?;
        Ok(self)
    }

    /// Adds a WHERE IS NULL clause.
    ///
    /// # Errors
    ///
    /// Same validation as [`TableQuery::filter`].
    pub fn filter_null(mut self, column: &str) -> Result<Self> {
        self.query.filter_null(column)?;
        Ok(self)
    }

    /// Adds a WHERE IS NOT NULL clause.
    ///
    /// # Errors
    ///
    /// Same validation as [`TableQuery::filter`].
    pub fn filter_not_null(mut self, column: &str) -> Result<Self> {
        self.query.filter_not_null(column)?;
        Ok(self)
    }

    /// Bulk adds WHERE clauses with a shared operator.
    ///
    /// # Errors
    ///
    /// Same validation as [`TableQuery::filter`], applied per pair.
    pub fn filter_all(
        mut self,
        columns: Vec<(&str, SqlValue)>,
        operator: ComparisonOperator,
    ) -> Result<Self> {
        self.query.filter_all(columns, operator)?;
        Ok(self)
    }

    /// Bulk adds negated WHERE clauses with a shared operator.
    ///
    /// # Errors
    ///
    /// Same validation as [`TableQuery::filter`], applied per pair.
    pub fn filter_all_not(
        mut self,
        columns: Vec<(&str, SqlValue)>,
        operator: ComparisonOperator,
    ) -> Result<Self> {
        self.query.filter_all_not(columns, operator)?;
        Ok(self)
    }

    /// Adds a nested OR subgroup built by the given closure.
    ///
    /// # Errors
    ///
    /// Propagates any validation error raised inside the closure.
    pub fn or_group(mut self, f: impl FnOnce(&mut WhereGroup) -> QueryResult<()>) -> Result<Self> {
        self.query.or_group(f)?;
        Ok(self)
    }

    /// Sets the sort direction.
    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.query.order(order);
        self
    }

    /// Sets the column to order by, optionally with a direction.
    #[must_use]
    pub fn order_by(mut self, column: &str, order: Option<Order>) -> Self {
        self.query.order_by(column, order);
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.query.limit(limit);
        self
    }

    /// Sets the row offset.
    #[must_use]
    pub fn offset(mut self, offset: i64) -> Self {
        self.query.offset(offset);
        self
    }

    // -------------------------------------------------------------------
    // Terminals
    // -------------------------------------------------------------------

    /// Fetches the matching rows.
    ///
    /// # Errors
    ///
    /// Fails when the driver rejects the statement.
    pub async fn get(self) -> Result<Vec<SqliteRow>> {
        let (sql, params) = self.query.build_select();
        self.manager.select(&sql, params).await
    }

    /// Bulk updates the matching rows, returning rows affected. Ordering
    /// and pagination set on the query do not scope the update; only the
    /// filters do.
    ///
    /// # Errors
    ///
    /// Fails when the driver rejects the statement.
    pub async fn update(self, data: &[(&str, SqlValue)]) -> Result<u64> {
        let (sql, params) = self.query.build_update(data);
        self.manager.execute(&sql, params).await
    }

    /// Bulk deletes the matching rows, returning rows affected. Ordering
    /// and pagination set on the query do not scope the delete; only the
    /// filters do.
    ///
    /// # Errors
    ///
    /// Fails when the driver rejects the statement.
    pub async fn delete(self) -> Result<u64> {
        let (sql, params) = self.query.build_delete();
        self.manager.execute(&sql, params).await
    }
}
