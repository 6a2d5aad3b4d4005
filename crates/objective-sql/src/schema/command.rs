//! DDL commands.

use std::fmt;

/// The DDL command a blueprint (or one of its column entries) represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// CREATE a table, or ADD a column in an ALTER context.
    #[default]
    Create,
    /// ALTER a table, or ALTER a column in an ALTER context.
    Alter,
    /// RENAME a table or column.
    Rename,
    /// DROP a table or column.
    Drop,
}

impl Command {
    /// Returns the SQL keyword for the command.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Alter => "ALTER",
            Self::Rename => "RENAME",
            Self::Drop => "DROP",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
