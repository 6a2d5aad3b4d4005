//! Closed sets of SQL tokens used by the query builder.

use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

/// Comparison operators for WHERE clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Equal (`=`)
    Eq,
    /// Not equal (`<>`)
    Neq,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Gte,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Lte,
    /// `IS` (NULL / boolean checks)
    Is,
    /// `LIKE` pattern match
    Like,
    /// `IN` list membership
    In,
}

impl ComparisonOperator {
    /// Returns the SQL token for the operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Neq => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Is => "IS",
            Self::Like => "LIKE",
            Self::In => "IN",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ComparisonOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Self::Eq),
            "<>" | "!=" => Ok(Self::Neq),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Gte),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Lte),
            "IS" => Ok(Self::Is),
            "LIKE" => Ok(Self::Like),
            "IN" => Ok(Self::In),
            other => Err(QueryError::UnknownOperator(other.to_string())),
        }
    }
}

/// Boolean operators combining sibling clauses in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BooleanOperator {
    /// All clauses must match.
    #[default]
    And,
    /// Any clause may match.
    Or,
}

impl BooleanOperator {
    /// Returns the SQL token for the relation.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for BooleanOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            other => Err(QueryError::UnknownRelation(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl Order {
    /// Returns the SQL token for the direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Order {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(QueryError::UnknownOrder(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_tokens_round_trip() {
        for op in [
            ComparisonOperator::Eq,
            ComparisonOperator::Neq,
            ComparisonOperator::Gt,
            ComparisonOperator::Gte,
            ComparisonOperator::Lt,
            ComparisonOperator::Lte,
            ComparisonOperator::Is,
            ComparisonOperator::Like,
            ComparisonOperator::In,
        ] {
            assert_eq!(op.as_sql().parse::<ComparisonOperator>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_tokens_error() {
        assert!(matches!(
            "=>".parse::<ComparisonOperator>(),
            Err(QueryError::UnknownOperator(_))
        ));
        assert!(matches!(
            "XOR".parse::<BooleanOperator>(),
            Err(QueryError::UnknownRelation(_))
        ));
        assert!(matches!(
            "UP".parse::<Order>(),
            Err(QueryError::UnknownOrder(_))
        ));
    }
}
