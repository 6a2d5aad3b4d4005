//! SQL values and parameter handling.
//!
//! Predicate values, insert/update data and bind parameters all travel as
//! [`SqlValue`]. The dispatch path keeps values out of the SQL text entirely
//! (placeholders plus a parameter list); [`SqlValue::to_sql_inline`] exists
//! for the escaped display rendering only.

use chrono::NaiveDateTime;

/// A SQL value that can be used as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
    /// Date-time value.
    DateTime(NaiveDateTime),
    /// A list of values, for `IN` predicates.
    List(Vec<SqlValue>),
}

impl SqlValue {
    /// Returns the SQL representation for inline use (escaped).
    ///
    /// **Warning**: prefer the parameterized builders; this is for display
    /// and debug rendering.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            Self::Int(n) => format!("{n}"),
            Self::Float(f) => format!("{f}"),
            Self::Text(s) => {
                // Escape single quotes by doubling them
                let escaped = s.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
            Self::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::List(values) => {
                let parts: Vec<String> = values.iter().map(Self::to_sql_inline).collect();
                format!("({})", parts.join(", "))
            }
        }
    }

    /// Returns the parameter placeholder.
    #[must_use]
    pub const fn placeholder() -> &'static str {
        "?"
    }

    /// Returns whether the value is a text holding a parseable number.
    #[must_use]
    pub fn is_numeric_text(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().parse::<f64>().is_ok(),
            _ => false,
        }
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a [`SqlValue`].
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for i16 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for i8 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u16 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u8 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for NaiveDateTime {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self)
    }
}

impl ToSqlValue for chrono::DateTime<chrono::Utc> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self.naive_utc())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl ToSqlValue for Vec<SqlValue> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self)
    }
}

impl ToSqlValue for Vec<i64> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self.into_iter().map(ToSqlValue::to_sql_value).collect())
    }
}

impl ToSqlValue for Vec<String> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self.into_iter().map(ToSqlValue::to_sql_value).collect())
    }
}

impl ToSqlValue for Vec<&str> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::List(self.into_iter().map(ToSqlValue::to_sql_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_escaping() {
        assert_eq!(SqlValue::Null.to_sql_inline(), "NULL");
        assert_eq!(SqlValue::Bool(true).to_sql_inline(), "TRUE");
        assert_eq!(SqlValue::Bool(false).to_sql_inline(), "FALSE");
        assert_eq!(SqlValue::Int(42).to_sql_inline(), "42");
        assert_eq!(SqlValue::Text("hello".into()).to_sql_inline(), "'hello'");
        assert_eq!(SqlValue::Text("it's".into()).to_sql_inline(), "'it''s'"); // Escaped
        assert_eq!(SqlValue::Blob(vec![0xAB, 0x01]).to_sql_inline(), "X'AB01'");
    }

    #[test]
    fn test_inline_list() {
        let list = vec![1i64, 2, 3].to_sql_value();
        assert_eq!(list.to_sql_inline(), "(1, 2, 3)");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(19i32.to_sql_value(), SqlValue::Int(19));
        assert_eq!("19".to_sql_value(), SqlValue::Text("19".into()));
        assert_eq!(Option::<i64>::None.to_sql_value(), SqlValue::Null);
        assert_eq!(
            vec!["a", "b"].to_sql_value(),
            SqlValue::List(vec![
                SqlValue::Text("a".into()),
                SqlValue::Text("b".into())
            ])
        );
    }

    #[test]
    fn test_numeric_text() {
        assert!(SqlValue::Text("19".into()).is_numeric_text());
        assert!(SqlValue::Text(" 3.5 ".into()).is_numeric_text());
        assert!(!SqlValue::Text("abc".into()).is_numeric_text());
        assert!(!SqlValue::Int(19).is_numeric_text());
    }
}
