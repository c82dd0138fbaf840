//! The trait record types implement to take part in a schema.

use crate::schema::Table;

/// A record type that declares its own table.
///
/// Implementors are plain Rust structs; nothing ever has to construct one
/// for the declaration to be usable.
///
/// # Examples
///
/// ```
/// use erdraw_core::schema::{Column, ColumnType, Entity, Schema, Table};
///
/// struct Tag {
///     id: i64,
/// }
///
/// impl Entity for Tag {
///     const TABLE: &'static str = "tag";
///
///     fn table() -> Table {
///         Table::new(Self::TABLE)
///             .with_column(Column::new("id", ColumnType::Integer).primary_key())
///     }
/// }
///
/// let schema = Schema::builder().with_entity::<Tag>().build();
/// assert!(schema.table("tag").is_some());
/// ```
pub trait Entity {
    /// Name of the table backing this entity.
    const TABLE: &'static str;

    /// Declares the table, its columns and its foreign keys.
    fn table() -> Table;
}
