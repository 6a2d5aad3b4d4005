//! Table blueprints.
//!
//! A [`Blueprint`] accumulates one table-level DDL operation: the table's
//! metadata (name, charset, command) plus an ordered list of column entries.
//! It is populated inside a caller-supplied configuration closure and
//! rendered exactly once via [`Blueprint::get_sql`].

use tracing::warn;

use super::column::ColumnDefinition;
use super::command::Command;
use crate::error::{SchemaError, SchemaResult};

/// A builder for one table-schema operation.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    /// The DDL command governing which renderer runs. Rendering with no
    /// command set is a configuration error.
    pub command: Option<Command>,
    /// The table name, already prefixed.
    pub name: String,
    /// The new table name, for renames.
    pub new_name: Option<String>,
    /// The table's column entries, in insertion order.
    pub columns: Vec<ColumnDefinition>,
    /// Charset/collation string appended to CREATE statements.
    pub charset_collate: String,
}

impl Blueprint {
    /// Creates an empty blueprint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------
    // Table-level metadata
    // -------------------------------------------------------------------

    /// Sets the table name.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Sets the new table name, for renames.
    pub fn new_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.new_name = Some(name.into());
        self
    }

    /// Sets the charset/collation string appended to CREATE statements.
    pub fn charset_collate(&mut self, charset: impl Into<String>) -> &mut Self {
        self.charset_collate = charset.into();
        self
    }

    /// Sets the DDL command.
    pub fn command(&mut self, command: Command) -> &mut Self {
        self.command = Some(command);
        self
    }

    // -------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------

    /// Appends a column entry and returns it for fluent configuration.
    ///
    /// This is the canonical entry point; every typed helper delegates here.
    pub fn column(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.columns.push(ColumnDefinition::new(name));
        self.columns.last_mut().expect("column was just pushed")
    }

    /// Adds a 'bool' column.
    pub fn boolean(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).boolean()
    }

    /// Adds a 'tinyint' column.
    pub fn tiny_integer(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).tiny_integer()
    }

    /// Adds a 'smallint' column.
    pub fn small_integer(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).small_integer()
    }

    /// Adds a 'mediumint' column.
    pub fn medium_integer(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).medium_integer()
    }

    /// Adds an 'int' column.
    pub fn integer(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).integer()
    }

    /// Adds a 'bigint' column.
    pub fn big_integer(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).big_integer()
    }

    /// Adds a 'decimal' column.
    pub fn decimal(&mut self, name: impl Into<String>, total: u16, places: u16) -> &mut ColumnDefinition {
        self.column(name).decimal(total, places)
    }

    /// Adds a 'double' column.
    pub fn double(&mut self, name: impl Into<String>, total: u16, places: u16) -> &mut ColumnDefinition {
        self.column(name).double(total, places)
    }

    /// Adds a 'float' column.
    pub fn float(&mut self, name: impl Into<String>, precision: u16) -> &mut ColumnDefinition {
        self.column(name).float(precision)
    }

    /// Adds a 'char' column, for fixed length strings.
    pub fn char(&mut self, name: impl Into<String>, length: u32) -> &mut ColumnDefinition {
        self.column(name).char(length)
    }

    /// Adds a 'varchar' column, for variable length strings.
    pub fn string(&mut self, name: impl Into<String>, length: u32) -> &mut ColumnDefinition {
        self.column(name).string(length)
    }

    /// Adds a 'tinytext' column.
    pub fn tiny_text(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).tiny_text()
    }

    /// Adds a 'text' column.
    pub fn text(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).text()
    }

    /// Adds a 'mediumtext' column.
    pub fn medium_text(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).medium_text()
    }

    /// Adds a 'longtext' column.
    pub fn long_text(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).long_text()
    }

    /// Adds a 'datetime' column.
    pub fn date_time(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).date_time()
    }

    /// Adds a 'date' column.
    pub fn date(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).date()
    }

    /// Adds a 'timestamp' column.
    pub fn timestamp(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).timestamp()
    }

    /// Adds a 'time' column.
    pub fn time(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).time()
    }

    /// Adds an auto-incrementing primary key ID column.
    pub fn id(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.integer(name).autoincrement().primary()
    }

    // -------------------------------------------------------------------
    // ALTER-context helpers
    // -------------------------------------------------------------------

    /// Adds a column entry tagged as an ADD for ALTER statements.
    pub fn create(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).create()
    }

    /// Adds a column entry tagged as an ALTER COLUMN for ALTER statements.
    pub fn alter(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).alter()
    }

    /// Adds a column entry tagged as a DROP COLUMN for ALTER statements.
    pub fn drop(&mut self, name: impl Into<String>) -> &mut ColumnDefinition {
        self.column(name).drop()
    }

    /// Adds a column entry tagged as a RENAME COLUMN for ALTER statements.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> &mut ColumnDefinition {
        self.column(name).rename(new_name)
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    /// Renders the complete DDL statement for the configured command.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingCommand`] when no command was set, and
    /// [`SchemaError::MissingNewName`] when rendering a table rename with no
    /// target name.
    pub fn get_sql(&self) -> SchemaResult<String> {
        let command = self.command.ok_or_else(|| SchemaError::MissingCommand {
            table: self.name.clone(),
        })?;

        match command {
            Command::Create => Ok(self.create_sql()),
            Command::Alter => Ok(self.alter_sql()),
            Command::Rename => self.rename_sql(),
            Command::Drop => Ok(self.drop_sql()),
        }
    }

    fn create_sql(&self) -> String {
        let mut definitions = Vec::new();

        for column in &self.columns {
            match column.definition_sql() {
                Some(definition) => definitions.push(definition),
                None => warn!(
                    table = %self.name,
                    column = %column.name,
                    "column has no type set, skipping in CREATE TABLE"
                ),
            }
        }

        // Key lines trail the column definitions. The doubled space in the
        // PRIMARY KEY line follows the dbDelta format.
        for column in &self.columns {
            let column_name = column.name.to_lowercase();

            if column.primary {
                definitions.push(format!("PRIMARY KEY  ({column_name})"));
            }
            if column.unique {
                definitions.push(format!("UNIQUE KEY {column_name} ({column_name})"));
            }
        }

        let table = self.name.to_lowercase();
        let body = definitions.join(",\n");

        if self.charset_collate.is_empty() {
            format!("CREATE TABLE {table} (\n{body}\n);")
        } else {
            format!("CREATE TABLE {table} (\n{body}\n) {};", self.charset_collate)
        }
    }

    fn alter_sql(&self) -> String {
        let mut changes = Vec::new();

        for column in &self.columns {
            let column_name = column.name.to_lowercase();

            match column.command {
                Command::Create => match column.definition_sql() {
                    Some(definition) => changes.push(format!("ADD {definition}")),
                    None => warn!(
                        table = %self.name,
                        column = %column.name,
                        "column has no type set, skipping ADD in ALTER TABLE"
                    ),
                },
                Command::Alter => match column.definition_sql() {
                    Some(definition) => changes.push(format!("ALTER COLUMN {definition}")),
                    None => warn!(
                        table = %self.name,
                        column = %column.name,
                        "column has no type set, skipping ALTER COLUMN in ALTER TABLE"
                    ),
                },
                Command::Drop => changes.push(format!("DROP COLUMN {column_name}")),
                Command::Rename => match &column.new_name {
                    Some(new_name) => changes.push(format!(
                        "RENAME COLUMN {column_name} to {}",
                        new_name.to_lowercase()
                    )),
                    None => warn!(
                        table = %self.name,
                        column = %column.name,
                        "column rename has no new name, skipping in ALTER TABLE"
                    ),
                },
            }
        }

        if changes.is_empty() {
            return String::new();
        }

        format!(
            "ALTER TABLE {}\n{}\n;",
            self.name.to_lowercase(),
            changes.join(",\n")
        )
    }

    fn rename_sql(&self) -> SchemaResult<String> {
        let new_name = self
            .new_name
            .as_ref()
            .ok_or_else(|| SchemaError::MissingNewName {
                table: self.name.clone(),
            })?;

        Ok(format!(
            "RENAME TABLE {} TO {};",
            self.name.to_lowercase(),
            new_name.to_lowercase()
        ))
    }

    fn drop_sql(&self) -> String {
        format!("DROP TABLE {};", self.name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_create_table() {
        let mut table = Blueprint::new();
        table
            .name("products")
            .charset_collate("utf8mb4")
            .command(Command::Create);
        table.id("id");
        table.text("name");

        assert_eq!(
            table.get_sql().unwrap(),
            "CREATE TABLE products (\nid int(4) NOT NULL AUTO_INCREMENT,\nname text NOT NULL,\nPRIMARY KEY  (id)\n) utf8mb4;"
        );
    }

    #[test]
    fn test_create_table_unique_key() {
        let mut table = Blueprint::new();
        table.name("users").command(Command::Create);
        table.string("email", 255).unique();

        assert_eq!(
            table.get_sql().unwrap(),
            "CREATE TABLE users (\nemail varchar(255) NOT NULL,\nUNIQUE KEY email (email)\n);"
        );
    }

    #[test]
    fn test_create_skips_untyped_column() {
        let mut table = Blueprint::new();
        table.name("products").command(Command::Create);
        table.text("name");
        table.column("untyped");

        let sql = table.get_sql().unwrap();
        assert_eq!(sql, "CREATE TABLE products (\nname text NOT NULL\n);");
    }

    #[test]
    fn test_create_definition_order_is_insertion_order() {
        let mut table = Blueprint::new();
        table.name("t").command(Command::Create);
        table.text("b");
        table.text("a");

        let sql = table.get_sql().unwrap();
        let b_at = sql.find("b text").unwrap();
        let a_at = sql.find("a text").unwrap();
        assert!(b_at < a_at);
    }

    #[test]
    fn test_alter_table() {
        let mut table = Blueprint::new();
        table.name("products").command(Command::Alter);
        table.create("colour").text();
        table.alter("price").decimal(16, 2);
        table.rename("title", "product_title");
        table.drop("stock");

        assert_eq!(
            table.get_sql().unwrap(),
            "ALTER TABLE products\nADD colour text NOT NULL,\nALTER COLUMN price decimal(16, 2) NOT NULL,\nRENAME COLUMN title to product_title,\nDROP COLUMN stock\n;"
        );
    }

    #[test]
    fn test_alter_with_no_columns_is_a_noop() {
        let mut table = Blueprint::new();
        table.name("products").command(Command::Alter);
        assert_eq!(table.get_sql().unwrap(), "");
    }

    #[test]
    fn test_rename_table() {
        let mut table = Blueprint::new();
        table
            .name("products")
            .new_name("product")
            .command(Command::Rename);
        assert_eq!(table.get_sql().unwrap(), "RENAME TABLE products TO product;");
    }

    #[test]
    fn test_rename_without_new_name_errors() {
        let mut table = Blueprint::new();
        table.name("products").command(Command::Rename);
        assert!(matches!(
            table.get_sql(),
            Err(SchemaError::MissingNewName { .. })
        ));
    }

    #[test]
    fn test_drop_table() {
        let mut table = Blueprint::new();
        table.name("products").command(Command::Drop);
        assert_eq!(table.get_sql().unwrap(), "DROP TABLE products;");
    }

    #[test]
    fn test_missing_command_errors() {
        let mut table = Blueprint::new();
        table.name("products");
        assert!(matches!(
            table.get_sql(),
            Err(SchemaError::MissingCommand { .. })
        ));
    }

    #[test]
    fn test_identifiers_are_lowercased() {
        let mut table = Blueprint::new();
        table.name("Products").command(Command::Create);
        table.text("Name");
        assert_eq!(
            table.get_sql().unwrap(),
            "CREATE TABLE products (\nname text NOT NULL\n);"
        );
    }

    #[test]
    fn test_setters_are_last_call_wins() {
        let mut table = Blueprint::new();
        table.name("first").name("second").command(Command::Drop);
        assert_eq!(table.get_sql().unwrap(), "DROP TABLE second;");
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let mut table = Blueprint::new();
        table
            .name("products")
            .charset_collate("utf8mb4")
            .command(Command::Create);
        table.id("id");
        table.text("name");

        assert_eq!(table.get_sql().unwrap(), table.get_sql().unwrap());
    }

    #[test]
    fn test_id_is_equivalent_to_manual_chain() {
        let mut via_id = Blueprint::new();
        via_id.id("x");

        let mut manual = Blueprint::new();
        manual.integer("x").autoincrement().primary();

        assert_eq!(via_id.columns, manual.columns);
    }
}
