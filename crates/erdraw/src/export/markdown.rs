//! The plain-text ER format.
//!
//! ```text
//! [user]
//!     *id {label:"INTEGER"}
//!     username {label:"VARCHAR(50)"}
//!
//! [post]
//!     *id {label:"INTEGER"}
//!     user_id {label:"INTEGER"}
//!
//! post *--1 user
//! ```
//!
//! Every table is a `[name]` block listing its columns in declaration
//! order, with `*` marking primary key columns. Relationships follow, one
//! per line, as `child <child cardinality>--<parent cardinality> parent`.

use std::{fmt, io::Write};

use erdraw_core::schema::Schema;

use super::{Error, Exporter};

/// Writes a schema in the ER markdown format.
pub struct Markdown<'a> {
    schema: &'a Schema,
}

impl<'a> Markdown<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }
}

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, table) in self.schema.tables().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", table.name())?;
            for column in table.columns() {
                let key = if column.is_primary_key() { "*" } else { "" };
                writeln!(
                    f,
                    "    {key}{} {{label:\"{}\"}}",
                    column.name(),
                    column.column_type()
                )?;
            }
        }

        if !self.schema.relationships().is_empty() {
            writeln!(f)?;
        }
        for relationship in self.schema.relationships() {
            writeln!(f, "{relationship}")?;
        }

        Ok(())
    }
}

impl Exporter for Markdown<'_> {
    fn export(&self, writer: &mut dyn Write) -> Result<(), Error> {
        write!(writer, "{self}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use erdraw_core::schema::{Column, ColumnType, ForeignKey, Table};

    use super::*;

    fn render(schema: &Schema) -> String {
        Markdown::new(schema).to_string()
    }

    #[test]
    fn test_small_schema() {
        let schema = Schema::builder()
            .with_table(
                Table::new("author")
                    .with_column(Column::new("id", ColumnType::Integer).primary_key())
                    .with_column(Column::new("name", ColumnType::varchar(80))),
            )
            .with_table(
                Table::new("book")
                    .with_column(Column::new("id", ColumnType::Integer).primary_key())
                    .with_column(
                        Column::new("author_id", ColumnType::Integer)
                            .not_null()
                            .references(ForeignKey::new("author", "id")),
                    ),
            )
            .build();

        let expected = "\
[author]
    *id {label:\"INTEGER\"}
    name {label:\"VARCHAR(80)\"}

[book]
    *id {label:\"INTEGER\"}
    author_id {label:\"INTEGER\"}

book *--1 author
";
        assert_eq!(render(&schema), expected);
    }

    #[test]
    fn test_social_schema_lists_everything() {
        let schema = erdraw_model::declare();
        let text = render(&schema);

        for table in schema.tables() {
            assert!(text.contains(&format!("[{}]", table.name())));
        }
        assert!(text.contains("    *user_from_id {label:\"INTEGER\"}"));
        assert!(text.contains("    *user_to_id {label:\"INTEGER\"}"));
        assert!(text.contains("    type {label:\"ENUM(image, video)\"}"));
        assert_eq!(text.lines().filter(|line| line.contains("*--1")).count(), 6);
    }

    #[test]
    fn test_export_matches_display() {
        let schema = erdraw_model::declare();
        let bytes = Markdown::new(&schema).to_bytes().unwrap();

        assert_eq!(String::from_utf8(bytes).unwrap(), render(&schema));
    }

    #[test]
    fn test_empty_schema() {
        assert_eq!(render(&Schema::default()), "");
    }
}
