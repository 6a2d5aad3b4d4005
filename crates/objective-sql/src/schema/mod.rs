//! Schema definition: blueprints, column definitions and DDL commands.

mod blueprint;
mod column;
mod command;

pub use blueprint::Blueprint;
pub use column::ColumnDefinition;
pub use command::Command;
