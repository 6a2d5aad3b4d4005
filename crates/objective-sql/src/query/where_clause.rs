//! Validated predicate trees for WHERE clauses.
//!
//! A [`Where`] is one comparison predicate; a [`WhereGroup`] combines
//! predicates (and nested groups) with a single boolean relation. Validation
//! happens at construction: an operator/value pairing that cannot render is
//! rejected before any SQL exists.

use crate::error::{QueryError, QueryResult};
use crate::value::{SqlValue, ToSqlValue};

use super::operator::{BooleanOperator, ComparisonOperator};

/// One comparison predicate.
///
/// Fields are private so [`Where::new`] is the only way to obtain one; a
/// `Where` that exists has passed operator/value validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    column: String,
    operator: ComparisonOperator,
    value: SqlValue,
    not: bool,
}

impl Where {
    /// Creates a predicate, validating the operator/value pairing.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidOperator`] when the pairing is invalid:
    /// ordering operators need a numeric or date-time value, `IS` needs a
    /// boolean or NULL, `LIKE` needs text, `IN` needs a list (and a list
    /// fits no other operator).
    pub fn new(
        column: impl Into<String>,
        operator: ComparisonOperator,
        value: impl ToSqlValue,
        not: bool,
    ) -> QueryResult<Self> {
        let clause = Self {
            column: column.into(),
            operator,
            value: value.to_sql_value(),
            not,
        };

        if clause.operator_is_valid() {
            Ok(clause)
        } else {
            Err(QueryError::InvalidOperator {
                column: clause.column,
                operator: clause.operator,
            })
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the comparison operator.
    #[must_use]
    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    /// Returns the value compared against.
    #[must_use]
    pub fn value(&self) -> &SqlValue {
        &self.value
    }

    /// Returns whether the predicate is negated.
    #[must_use]
    pub fn is_not(&self) -> bool {
        self.not
    }

    /// Checks the combination of operator and value type.
    #[must_use]
    pub fn operator_is_valid(&self) -> bool {
        match self.operator {
            ComparisonOperator::Gt
            | ComparisonOperator::Gte
            | ComparisonOperator::Lt
            | ComparisonOperator::Lte => matches!(
                self.value,
                SqlValue::Int(_) | SqlValue::Float(_) | SqlValue::DateTime(_)
            ) || self.value.is_numeric_text(),

            ComparisonOperator::Is => {
                matches!(self.value, SqlValue::Bool(_) | SqlValue::Null)
            }

            ComparisonOperator::Like => matches!(self.value, SqlValue::Text(_)),

            ComparisonOperator::In => matches!(self.value, SqlValue::List(_)),

            ComparisonOperator::Eq | ComparisonOperator::Neq => {
                !matches!(self.value, SqlValue::List(_))
            }
        }
    }

    /// Renders the predicate with `?` placeholders, pushing bound values
    /// onto `params`.
    #[must_use]
    pub fn to_sql(&self, params: &mut Vec<SqlValue>) -> String {
        match self.operator {
            ComparisonOperator::Is => self.is_sql(),
            ComparisonOperator::Like => {
                params.push(self.value.clone());
                if self.not {
                    format!("{} NOT LIKE ?", self.column)
                } else {
                    format!("{} LIKE ?", self.column)
                }
            }
            ComparisonOperator::In => {
                let SqlValue::List(values) = &self.value else {
                    // Construction validated the value is a list.
                    unreachable!("IN predicate holds a non-list value");
                };
                if values.is_empty() {
                    return self.empty_in_sql();
                }
                let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
                params.extend(values.iter().cloned());
                if self.not {
                    format!("{} NOT IN ({})", self.column, placeholders.join(", "))
                } else {
                    format!("{} IN ({})", self.column, placeholders.join(", "))
                }
            }
            _ => {
                params.push(self.value.clone());
                if self.not {
                    format!("NOT ({} {} ?)", self.column, self.operator)
                } else {
                    format!("{} {} ?", self.column, self.operator)
                }
            }
        }
    }

    /// Renders the predicate with values inlined (escaped). Display form
    /// only; dispatch uses [`Where::to_sql`].
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self.operator {
            ComparisonOperator::Is => self.is_sql(),
            ComparisonOperator::Like => {
                if self.not {
                    format!("{} NOT LIKE {}", self.column, self.value.to_sql_inline())
                } else {
                    format!("{} LIKE {}", self.column, self.value.to_sql_inline())
                }
            }
            ComparisonOperator::In => {
                let SqlValue::List(values) = &self.value else {
                    unreachable!("IN predicate holds a non-list value");
                };
                if values.is_empty() {
                    return self.empty_in_sql();
                }
                if self.not {
                    format!("{} NOT IN {}", self.column, self.value.to_sql_inline())
                } else {
                    format!("{} IN {}", self.column, self.value.to_sql_inline())
                }
            }
            _ => {
                if self.not {
                    format!(
                        "NOT ({} {} {})",
                        self.column,
                        self.operator,
                        self.value.to_sql_inline()
                    )
                } else {
                    format!(
                        "{} {} {}",
                        self.column,
                        self.operator,
                        self.value.to_sql_inline()
                    )
                }
            }
        }
    }

    // IS renders inline tokens; `IS ?` is not portable and the value is
    // validated to be exactly NULL, TRUE or FALSE.
    fn is_sql(&self) -> String {
        let token = match self.value {
            SqlValue::Null => "NULL",
            SqlValue::Bool(true) => "TRUE",
            SqlValue::Bool(false) => "FALSE",
            _ => unreachable!("IS predicate holds a non-boolean, non-null value"),
        };
        if self.not {
            format!("{} IS NOT {token}", self.column)
        } else {
            format!("{} IS {token}", self.column)
        }
    }

    // An empty IN list can never match; render a constant predicate rather
    // than the invalid `IN ()`.
    fn empty_in_sql(&self) -> String {
        if self.not {
            String::from("1 = 1")
        } else {
            String::from("1 = 0")
        }
    }
}

/// A clause slot in a group: either a single predicate or a nested group.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereClause {
    /// A single predicate.
    Cond(Where),
    /// A nested group, parenthesized when rendered.
    Group(WhereGroup),
}

/// A boolean-combined collection of WHERE clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereGroup {
    /// The clauses, in insertion (= rendering) order.
    pub clauses: Vec<WhereClause>,
    /// The relation combining all direct children.
    pub relation: BooleanOperator,
}

impl Default for WhereGroup {
    fn default() -> Self {
        Self::new(BooleanOperator::And)
    }
}

impl WhereGroup {
    /// Creates an empty group with the given relation.
    #[must_use]
    pub fn new(relation: BooleanOperator) -> Self {
        Self {
            clauses: Vec::new(),
            relation,
        }
    }

    /// Appends a predicate.
    pub fn add(&mut self, clause: Where) -> &mut Self {
        self.clauses.push(WhereClause::Cond(clause));
        self
    }

    /// Appends a nested group.
    pub fn add_group(&mut self, group: WhereGroup) -> &mut Self {
        self.clauses.push(WhereClause::Group(group));
        self
    }

    /// Changes the group's relation.
    pub fn relation(&mut self, relation: BooleanOperator) -> &mut Self {
        self.relation = relation;
        self
    }

    /// Builds and appends a predicate in one call.
    ///
    /// # Errors
    ///
    /// Propagates the validation error from [`Where::new`].
    pub fn push(
        &mut self,
        column: impl Into<String>,
        operator: ComparisonOperator,
        value: impl ToSqlValue,
        not: bool,
    ) -> QueryResult<&mut Self> {
        let clause = Where::new(column, operator, value, not)?;
        Ok(self.add(clause))
    }

    /// Returns whether the group renders no predicate. Nested groups count
    /// only for the predicates they hold, so a group whose every slot is an
    /// empty group is itself empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.iter().all(|clause| match clause {
            WhereClause::Cond(_) => false,
            WhereClause::Group(group) => group.is_empty(),
        })
    }

    /// Renders the group with `?` placeholders, pushing bound values onto
    /// `params`. An empty group renders an empty string.
    #[must_use]
    pub fn to_sql(&self, params: &mut Vec<SqlValue>) -> String {
        let parts: Vec<String> = self
            .clauses
            .iter()
            .filter_map(|clause| match clause {
                WhereClause::Cond(w) => Some(w.to_sql(params)),
                WhereClause::Group(g) if g.is_empty() => None,
                WhereClause::Group(g) => Some(format!("({})", g.to_sql(params))),
            })
            .collect();

        parts.join(&format!(" {} ", self.relation))
    }

    /// Renders the group with values inlined (escaped).
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        let parts: Vec<String> = self
            .clauses
            .iter()
            .filter_map(|clause| match clause {
                WhereClause::Cond(w) => Some(w.to_sql_inline()),
                WhereClause::Group(g) if g.is_empty() => None,
                WhereClause::Group(g) => Some(format!("({})", g.to_sql_inline())),
            })
            .collect();

        parts.join(&format!(" {} ", self.relation))
    }
}
