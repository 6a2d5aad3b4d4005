//! Column definitions.
//!
//! A [`ColumnDefinition`] describes one column's type and constraints, and,
//! in an ALTER context, which sub-operation (add/alter/rename/drop) applies
//! to it. Definitions are built fluently inside a blueprint's configuration
//! closure and consumed when the blueprint renders.

use super::command::Command;

/// A single column's type, constraints and ALTER sub-operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// The column name.
    pub name: String,
    /// The new column name, for renames.
    pub new_name: Option<String>,
    /// The raw SQL type, e.g. `VARCHAR(255)`. A column with no type is
    /// skipped at render time.
    pub ty: Option<String>,
    /// Whether the column accepts NULL. Columns render `NOT NULL` unless
    /// [`nullable`](Self::nullable) is called.
    pub nullable: bool,
    /// Whether the column is unsigned.
    pub unsigned: bool,
    /// The default value literal.
    pub default: Option<String>,
    /// Whether the column auto-increments.
    pub autoincrement: bool,
    /// Whether the column is the primary key.
    pub primary: bool,
    /// Whether the column is unique.
    pub unique: bool,
    /// Which DDL sub-operation this entry represents in an ALTER statement.
    pub command: Command,
}

impl ColumnDefinition {
    /// Creates a column definition with no type set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            new_name: None,
            ty: None,
            nullable: false,
            unsigned: false,
            default: None,
            autoincrement: false,
            primary: false,
            unique: false,
            command: Command::Create,
        }
    }

    // -------------------------------------------------------------------
    // Type helpers
    // -------------------------------------------------------------------

    /// Sets the raw SQL type. No validation is performed; the string is
    /// passed through to the eventual dialect.
    pub fn ty(&mut self, ty: impl Into<String>) -> &mut Self {
        self.ty = Some(ty.into());
        self
    }

    /// A 'bool' column.
    pub fn boolean(&mut self) -> &mut Self {
        self.ty("MEDIUMINT")
    }

    /// A 'tinyint' column.
    pub fn tiny_integer(&mut self) -> &mut Self {
        self.ty("TINYINT(1)")
    }

    /// A 'smallint' column.
    pub fn small_integer(&mut self) -> &mut Self {
        self.ty("SMALLINT(2)")
    }

    /// A 'mediumint' column.
    pub fn medium_integer(&mut self) -> &mut Self {
        self.ty("MEDIUMINT(3)")
    }

    /// An 'int' column.
    pub fn integer(&mut self) -> &mut Self {
        self.ty("INT(4)")
    }

    /// A 'bigint' column.
    pub fn big_integer(&mut self) -> &mut Self {
        self.ty("BIGINT(8)")
    }

    /// A 'decimal' column with the given precision and scale.
    pub fn decimal(&mut self, total: u16, places: u16) -> &mut Self {
        self.ty(format!("DECIMAL({total}, {places})"))
    }

    /// A 'double' column with the given precision and scale.
    pub fn double(&mut self, total: u16, places: u16) -> &mut Self {
        self.ty(format!("DOUBLE({total}, {places})"))
    }

    /// A 'float' column with the given precision.
    pub fn float(&mut self, precision: u16) -> &mut Self {
        self.ty(format!("FLOAT({precision})"))
    }

    /// A 'char' column, for fixed length strings.
    pub fn char(&mut self, length: u32) -> &mut Self {
        self.ty(format!("CHAR({length})"))
    }

    /// A 'varchar' column, for variable length strings.
    pub fn string(&mut self, length: u32) -> &mut Self {
        self.ty(format!("VARCHAR({length})"))
    }

    /// A 'tinytext' column.
    pub fn tiny_text(&mut self) -> &mut Self {
        self.ty("TINYTEXT")
    }

    /// A 'text' column.
    pub fn text(&mut self) -> &mut Self {
        self.ty("TEXT")
    }

    /// A 'mediumtext' column.
    pub fn medium_text(&mut self) -> &mut Self {
        self.ty("MEDIUMTEXT")
    }

    /// A 'longtext' column.
    pub fn long_text(&mut self) -> &mut Self {
        self.ty("LONGTEXT")
    }

    /// A 'datetime' column.
    pub fn date_time(&mut self) -> &mut Self {
        self.ty("DATETIME")
    }

    /// A 'date' column.
    pub fn date(&mut self) -> &mut Self {
        self.ty("DATE")
    }

    /// A 'timestamp' column.
    pub fn timestamp(&mut self) -> &mut Self {
        self.ty("TIMESTAMP")
    }

    /// A 'time' column.
    pub fn time(&mut self) -> &mut Self {
        self.ty("TIME")
    }

    // -------------------------------------------------------------------
    // Modifiers
    // -------------------------------------------------------------------

    /// Makes the column nullable.
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    /// Makes the column unsigned.
    pub fn unsigned(&mut self) -> &mut Self {
        self.unsigned = true;
        self
    }

    /// Makes the column auto-increment.
    pub fn autoincrement(&mut self) -> &mut Self {
        self.autoincrement = true;
        self
    }

    /// Sets the default value literal.
    pub fn default_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    /// Makes the column the primary key.
    pub fn primary(&mut self) -> &mut Self {
        self.primary = true;
        self
    }

    /// Makes the column unique.
    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    // -------------------------------------------------------------------
    // ALTER sub-operation selectors
    // -------------------------------------------------------------------

    /// Marks this entry as an ADD in an ALTER statement.
    pub fn create(&mut self) -> &mut Self {
        self.command = Command::Create;
        self
    }

    /// Marks this entry as an ALTER COLUMN in an ALTER statement.
    pub fn alter(&mut self) -> &mut Self {
        self.command = Command::Alter;
        self
    }

    /// Marks this entry as a RENAME COLUMN in an ALTER statement.
    pub fn rename(&mut self, new_name: impl Into<String>) -> &mut Self {
        self.command = Command::Rename;
        self.new_name = Some(new_name.into());
        self
    }

    /// Marks this entry as a DROP COLUMN in an ALTER statement.
    pub fn drop(&mut self) -> &mut Self {
        self.command = Command::Drop;
        self
    }

    /// Renders the column's definition fragment, e.g.
    /// `price decimal(16, 2) NOT NULL`, or `None` when no type is set.
    ///
    /// Identifiers and types are lower-cased before emission. This is a
    /// case-normalization policy, not an escaping mechanism; names must be
    /// trusted literals.
    #[must_use]
    pub fn definition_sql(&self) -> Option<String> {
        let ty = self.ty.as_ref()?;

        let mut line = format!("{} {}", self.name.to_lowercase(), ty.to_lowercase());

        if self.unsigned {
            line.push_str(" UNSIGNED");
        }

        if let Some(default) = &self.default {
            line.push_str(&format!(" DEFAULT '{default}'"));
        }

        if !self.nullable {
            line.push_str(" NOT NULL");
        }

        if self.autoincrement {
            line.push_str(" AUTO_INCREMENT");
        }

        Some(line)
    }
}
