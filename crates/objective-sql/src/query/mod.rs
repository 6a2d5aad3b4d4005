//! Query building: operators, predicate trees and the fluent builder.

mod builder;
mod operator;
mod where_clause;

pub use builder::{Query, NO_LIMIT};
pub use operator::{BooleanOperator, ComparisonOperator, Order};
pub use where_clause::{Where, WhereClause, WhereGroup};
