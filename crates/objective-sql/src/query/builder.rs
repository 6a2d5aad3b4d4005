//! Fluent query builder.
//!
//! A [`Query`] accumulates one filtered table operation (predicates,
//! ordering, pagination) and renders it as a parameterized SELECT, UPDATE or
//! DELETE. The builder never inlines values into the dispatchable SQL text;
//! [`Query::to_sql`] is the escaped display form.

use tracing::debug;

use crate::error::QueryResult;
use crate::value::{SqlValue, ToSqlValue};

use super::operator::{BooleanOperator, ComparisonOperator, Order};
use super::where_clause::WhereGroup;

/// Sentinel meaning no LIMIT clause is emitted.
pub const NO_LIMIT: i64 = -1;

/// A builder for one DML operation against a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The table being queried.
    pub table: String,
    /// The accumulated predicates, AND-related by default.
    pub where_group: WhereGroup,
    /// Sort direction, applied only when `order_by` is set.
    pub order: Order,
    /// Column to order by; `None` emits no ORDER BY.
    pub order_by: Option<String>,
    /// Row limit; [`NO_LIMIT`] emits no LIMIT.
    pub limit: i64,
    /// Row offset; zero emits no OFFSET.
    pub offset: i64,
}

impl Query {
    /// Creates a query against the given table.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            where_group: WhereGroup::new(BooleanOperator::And),
            order: Order::Asc,
            order_by: None,
            limit: NO_LIMIT,
            offset: 0,
        }
    }

    /// Sets the table to query.
    pub fn table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    // -------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------

    /// Adds a WHERE clause.
    ///
    /// # Errors
    ///
    /// Fails fast when the operator and value type are incompatible; see
    /// [`Where::new`].
    pub fn filter(
        &mut self,
        column: impl Into<String>,
        operator: ComparisonOperator,
        value: impl ToSqlValue,
    ) -> QueryResult<&mut Self> {
        self.where_group.push(column, operator, value, false)?;
        Ok(self)
    }

    /// Adds a negated WHERE clause.
    ///
    /// # Errors
    ///
    /// Same validation as [`Query::filter`].
    pub fn filter_not(
        &mut self,
        column: impl Into<String>,
        operator: ComparisonOperator,
        value: impl ToSqlValue,
    ) -> QueryResult<&mut Self> {
        self.where_group.push(column, operator, value, true)?;
        Ok(self)
    }

    /// Adds a WHERE IN clause.
    ///
    /// # Errors
    ///
    /// Same validation as [`Query::filter`].
    pub fn filter_in<V: ToSqlValue>(
        &mut self,
        column: impl Into<String>,
        values: Vec<V>,
    ) -> QueryResult<&mut Self> {
        let list: Vec<SqlValue> = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        self.filter(column, ComparisonOperator::In, list)
    }

    /// Adds a WHERE NOT IN clause.
    ///
    /// # Errors
    ///
    /// Same validation as [`Query::filter`].
    pub fn filter_not_in<V: ToSqlValue>(
        &mut self,
        column: impl Into<String>,
        values: Vec<V>,
    ) -> QueryResult<&mut Self> {
        let list: Vec<SqlValue> = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        self.filter_not(column, ComparisonOperator::In, list)
    }

    /// Adds a WHERE IS NULL clause.
    ///
    /// # Errors
    ///
    /// Same validation as [`Query::filter`].
    pub fn filter_null(&mut self, column: impl Into<String>) -> QueryResult<&mut Self> {
        self.filter(column, ComparisonOperator::Is, SqlValue::Null)
    }

    /// Adds a WHERE IS NOT NULL clause.
    ///
    /// # Errors
    ///
    /// Same validation as [`Query::filter`].
    pub fn filter_not_null(&mut self, column: impl Into<String>) -> QueryResult<&mut Self> {
        self.filter_not(column, ComparisonOperator::Is, SqlValue::Null)
    }

    /// Bulk adds WHERE clauses, one per column/value pair, all with the same
    /// operator.
    ///
    /// # Errors
    ///
    /// Same validation as [`Query::filter`], applied per pair.
    pub fn filter_all(
        &mut self,
        columns: Vec<(&str, SqlValue)>,
        operator: ComparisonOperator,
    ) -> QueryResult<&mut Self> {
        for (column, value) in columns {
            self.filter(column, operator, value)?;
        }
        Ok(self)
    }

    /// Bulk adds negated WHERE clauses.
    ///
    /// # Errors
    ///
    /// Same validation as [`Query::filter`], applied per pair.
    pub fn filter_all_not(
        &mut self,
        columns: Vec<(&str, SqlValue)>,
        operator: ComparisonOperator,
    ) -> QueryResult<&mut Self> {
        for (column, value) in columns {
            self.filter_not(column, operator, value)?;
        }
        Ok(self)
    }

    /// Adds a nested OR subgroup built by the given closure, for
    /// `a AND (b OR c)`-style compositions.
    ///
    /// # Errors
    ///
    /// Propagates any validation error raised inside the closure.
    pub fn or_group(
        &mut self,
        f: impl FnOnce(&mut WhereGroup) -> QueryResult<()>,
    ) -> QueryResult<&mut Self> {
        let mut group = WhereGroup::new(BooleanOperator::Or);
        f(&mut group)?;
        self.where_group.add_group(group);
        Ok(self)
    }

    // -------------------------------------------------------------------
    // Ordering and pagination
    // -------------------------------------------------------------------

    /// Sets the sort direction.
    pub fn order(&mut self, order: Order) -> &mut Self {
        self.order = order;
        self
    }

    /// Sets the column to order by, optionally with a direction.
    pub fn order_by(&mut self, column: impl Into<String>, order: Option<Order>) -> &mut Self {
        self.order_by = Some(column.into());
        if let Some(order) = order {
            self.order = order;
        }
        self
    }

    /// Sets the row limit. [`NO_LIMIT`] removes the clause.
    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.limit = limit;
        self
    }

    /// Sets the row offset.
    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.offset = offset;
        self
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    /// Builds the parameterized SELECT statement and its bindings.
    ///
    /// Clause order is fixed: WHERE, ORDER BY, LIMIT, OFFSET.
    #[must_use]
    pub fn build_select(&self) -> (String, Vec<SqlValue>) {
        let mut sql = format!("SELECT * FROM {}", self.table);
        let mut params = Vec::new();

        if !self.where_group.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_group.to_sql(&mut params));
        }

        self.push_tail(&mut sql);

        (sql, params)
    }

    /// Builds the parameterized UPDATE statement and its bindings. SET
    /// bindings precede WHERE bindings.
    ///
    /// Only the WHERE clause scopes the statement; any ordering or
    /// pagination set on the query is ignored.
    #[must_use]
    pub fn build_update(&self, data: &[(&str, SqlValue)]) -> (String, Vec<SqlValue>) {
        self.warn_dropped_tail("UPDATE");

        let mut params = Vec::new();

        let assignments: Vec<String> = data
            .iter()
            .map(|(column, value)| {
                params.push(value.clone());
                format!("{column} = ?")
            })
            .collect();

        let mut sql = format!("UPDATE {} SET {}", self.table, assignments.join(", "));

        if !self.where_group.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_group.to_sql(&mut params));
        }

        (sql, params)
    }

    /// Builds the parameterized DELETE statement and its bindings.
    ///
    /// Only the WHERE clause scopes the statement; any ordering or
    /// pagination set on the query is ignored.
    #[must_use]
    pub fn build_delete(&self) -> (String, Vec<SqlValue>) {
        self.warn_dropped_tail("DELETE");

        let mut sql = format!("DELETE FROM {}", self.table);
        let mut params = Vec::new();

        if !self.where_group.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_group.to_sql(&mut params));
        }

        (sql, params)
    }

    /// Renders the SELECT with values inlined (escaped). Display form only;
    /// dispatch uses [`Query::build_select`].
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = format!("SELECT * FROM {}", self.table);

        if !self.where_group.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_group.to_sql_inline());
        }

        self.push_tail(&mut sql);

        sql
    }

    // UPDATE and DELETE carry WHERE only; SQLite's default build rejects
    // ORDER BY/LIMIT on them.
    fn warn_dropped_tail(&self, statement: &str) {
        if self.order_by.is_some() || self.limit != NO_LIMIT || self.offset != 0 {
            debug!(
                table = %self.table,
                statement,
                "ordering and pagination are ignored for this statement"
            );
        }
    }

    // ORDER BY / LIMIT / OFFSET, shared between the bound and inline forms.
    fn push_tail(&self, sql: &mut String) {
        if let Some(order_by) = &self.order_by {
            sql.push_str(&format!(" ORDER BY {order_by} {}", self.order));
        }

        if self.limit != NO_LIMIT {
            sql.push_str(&format!(" LIMIT {}", self.limit));
        }

        if self.offset != 0 {
            sql.push_str(&format!(" OFFSET {}", self.offset));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_select() {
        let query = Query::new("products");
        let (sql, params) = query.build_select();
        assert_eq!(sql, "SELECT * FROM products");
        assert!(params.is_empty());
    }

    #[test]
    fn test_clause_ordering() {
        let mut query = Query::new("products");
        query
            .filter("id", ComparisonOperator::Gte, "19")
            .unwrap()
            .limit(50)
            .offset(12)
            .order_by("id", Some(Order::Asc));

        assert_eq!(
            query.to_sql(),
            "SELECT * FROM products WHERE id >= '19' ORDER BY id ASC LIMIT 50 OFFSET 12"
        );

        let (sql, params) = query.build_select();
        assert_eq!(
            sql,
            "SELECT * FROM products WHERE id >= ? ORDER BY id ASC LIMIT 50 OFFSET 12"
        );
        assert_eq!(params, vec![SqlValue::Text("19".into())]);
    }

    #[test]
    fn test_no_order_by_means_no_order_clause() {
        let mut query = Query::new("products");
        query.order(Order::Desc);
        assert_eq!(query.to_sql(), "SELECT * FROM products");
    }

    #[test]
    fn test_limit_sentinel_and_zero_offset_are_omitted() {
        let mut query = Query::new("products");
        query.limit(NO_LIMIT).offset(0);
        assert_eq!(query.to_sql(), "SELECT * FROM products");
    }

    #[test]
    fn test_filters_combine_with_and_in_append_order() {
        let mut query = Query::new("products");
        query
            .filter("status", ComparisonOperator::Eq, "live")
            .unwrap()
            .filter("votes", ComparisonOperator::Gt, 10)
            .unwrap();

        let (sql, params) = query.build_select();
        assert_eq!(
            sql,
            "SELECT * FROM products WHERE status = ? AND votes > ?"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_or_group_nests_and_parenthesizes() {
        let mut query = Query::new("products");
        query
            .filter("status", ComparisonOperator::Eq, "live")
            .unwrap()
            .or_group(|group| {
                group
                    .push("votes", ComparisonOperator::Gt, 10, false)?
                    .push("featured", ComparisonOperator::Is, true, false)?;
                Ok(())
            })
            .unwrap();

        let (sql, params) = query.build_select();
        assert_eq!(
            sql,
            "SELECT * FROM products WHERE status = ? AND (votes > ? OR featured IS TRUE)"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_or_group_that_adds_nothing_emits_no_where() {
        let mut query = Query::new("products");
        query.or_group(|_| Ok(())).unwrap();

        let (sql, params) = query.build_select();
        assert_eq!(sql, "SELECT * FROM products");
        assert!(params.is_empty());

        let (sql, _) = query.build_delete();
        assert_eq!(sql, "DELETE FROM products");

        let (sql, _) = query.build_update(&[("stock", SqlValue::Int(0))]);
        assert_eq!(sql, "UPDATE products SET stock = ?");
    }

    #[test]
    fn test_empty_or_group_beside_a_filter_is_skipped() {
        let mut query = Query::new("products");
        query
            .filter("status", ComparisonOperator::Eq, "live")
            .unwrap()
            .or_group(|_| Ok(()))
            .unwrap();

        let (sql, _) = query.build_select();
        assert_eq!(sql, "SELECT * FROM products WHERE status = ?");
    }

    #[test]
    fn test_filter_in_and_null_sugar() {
        let mut query = Query::new("products");
        query
            .filter_in("id", vec![1i64, 2])
            .unwrap()
            .filter_not_null("name")
            .unwrap();

        let (sql, params) = query.build_select();
        assert_eq!(
            sql,
            "SELECT * FROM products WHERE id IN (?, ?) AND name IS NOT NULL"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_filter_all() {
        let mut query = Query::new("products");
        query
            .filter_all(
                vec![("a", SqlValue::Int(1)), ("b", SqlValue::Int(2))],
                ComparisonOperator::Eq,
            )
            .unwrap();

        let (sql, _) = query.build_select();
        assert_eq!(sql, "SELECT * FROM products WHERE a = ? AND b = ?");
    }

    #[test]
    fn test_invalid_filter_fails_fast() {
        let mut query = Query::new("products");
        assert!(query.filter("votes", ComparisonOperator::Gt, "abc").is_err());
    }

    #[test]
    fn test_build_update() {
        let mut query = Query::new("products");
        query.filter("id", ComparisonOperator::Gte, 19).unwrap();

        let (sql, params) = query.build_update(&[
            ("title", SqlValue::Text("Untitled Product".into())),
            ("stock", SqlValue::Int(0)),
        ]);
        assert_eq!(
            sql,
            "UPDATE products SET title = ?, stock = ? WHERE id >= ?"
        );
        assert_eq!(
            params,
            vec![
                SqlValue::Text("Untitled Product".into()),
                SqlValue::Int(0),
                SqlValue::Int(19)
            ]
        );
    }

    #[test]
    fn test_build_delete() {
        let mut query = Query::new("products");
        query.filter("id", ComparisonOperator::Gte, 19).unwrap();

        let (sql, params) = query.build_delete();
        assert_eq!(sql, "DELETE FROM products WHERE id >= ?");
        assert_eq!(params, vec![SqlValue::Int(19)]);
    }

    #[test]
    fn test_update_and_delete_carry_where_only() {
        let mut query = Query::new("products");
        query
            .filter("id", ComparisonOperator::Gte, 19)
            .unwrap()
            .order_by("id", Some(Order::Desc))
            .limit(5)
            .offset(2);

        let (sql, _) = query.build_delete();
        assert_eq!(sql, "DELETE FROM products WHERE id >= ?");

        let (sql, _) = query.build_update(&[("stock", SqlValue::Int(0))]);
        assert_eq!(sql, "UPDATE products SET stock = ? WHERE id >= ?");
    }

    #[test]
    fn test_pagination_setters_last_call_wins() {
        let mut query = Query::new("products");
        query.limit(10).limit(20).offset(5).offset(7);
        assert_eq!(query.to_sql(), "SELECT * FROM products LIMIT 20 OFFSET 7");
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let mut query = Query::new("products");
        query
            .filter("id", ComparisonOperator::Gte, 19)
            .unwrap()
            .order_by("id", None)
            .limit(5);

        assert_eq!(query.build_select(), query.build_select());
        assert_eq!(query.to_sql(), query.to_sql());
    }
}
