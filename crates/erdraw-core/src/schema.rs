//! Schema model: tables, columns and the relationships between them.
//!
//! A [`Schema`] is an immutable value. It is assembled once through
//! [`SchemaBuilder`] and then handed, by reference, to whatever consumes it.
//!
//! # Overview
//!
//! - [`Schema`] / [`SchemaBuilder`] - the complete entity/relationship graph
//! - [`Table`], [`Column`], [`ColumnType`], [`ForeignKey`] - table structure
//! - [`Relationship`], [`Cardinality`] - directed foreign key edges
//! - [`Entity`] - declares a table from a Rust record type
//! - [`Filter`] - table and column selection
//!
//! # Example
//!
//! ```
//! use erdraw_core::schema::{Column, ColumnType, ForeignKey, Schema, Table};
//!
//! let schema = Schema::builder()
//!     .with_table(
//!         Table::new("author").with_column(Column::new("id", ColumnType::Integer).primary_key()),
//!     )
//!     .with_table(
//!         Table::new("book")
//!             .with_column(Column::new("id", ColumnType::Integer).primary_key())
//!             .with_column(
//!                 Column::new("author_id", ColumnType::Integer)
//!                     .not_null()
//!                     .references(ForeignKey::new("author", "id")),
//!             ),
//!     )
//!     .build();
//!
//! assert_eq!(schema.len(), 2);
//! assert_eq!(schema.referencing("author").count(), 1);
//! ```

mod column;
mod entity;
mod filter;
mod relationship;
mod table;

pub use column::{Column, ColumnType, ForeignKey};
pub use entity::Entity;
pub use filter::Filter;
pub use relationship::{Cardinality, Relationship};
pub use table::Table;

use log::{debug, trace};

use crate::identifier::Id;

/// The complete, immutable description of a set of tables and their
/// relationships.
///
/// Tables keep their declaration order, which is also the order in which
/// they are drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    tables: Vec<Table>,
    relationships: Vec<Relationship>,
}

impl Schema {
    /// Starts building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Looks up a table by name.
    pub fn table(&self, name: impl Into<Id>) -> Option<&Table> {
        let name = name.into();
        self.tables.iter().find(|table| table.name() == name)
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Returns the relationships owned by `table`, one per foreign key column.
    pub fn relationships_from(&self, table: impl Into<Id>) -> impl Iterator<Item = &Relationship> {
        let table = table.into();
        self.relationships
            .iter()
            .filter(move |rel| rel.table() == table)
    }

    /// Returns the relationships pointing at `table`.
    ///
    /// This is how a parent finds its children: a user's posts are the
    /// relationships from `post` whose parent is `user`.
    pub fn referencing(&self, table: impl Into<Id>) -> impl Iterator<Item = &Relationship> {
        let table = table.into();
        self.relationships
            .iter()
            .filter(move |rel| rel.parent_table() == table)
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns a copy of the schema reduced to what `filter` keeps.
    ///
    /// A relationship survives only when both of its tables and both of its
    /// columns do.
    pub fn filtered(&self, filter: &Filter) -> Schema {
        if filter.is_empty() {
            return self.clone();
        }

        let tables: Vec<Table> = self
            .tables
            .iter()
            .filter(|table| filter.keeps_table(table.name()))
            .map(|table| table.retain_columns(|column| filter.keeps_column(table.name(), column.name())))
            .collect();

        let has_column = |table: Id, column: Id| {
            tables
                .iter()
                .any(|t| t.name() == table && t.column(column).is_some())
        };
        let relationships: Vec<Relationship> = self
            .relationships
            .iter()
            .filter(|rel| {
                has_column(rel.table(), rel.column())
                    && has_column(rel.parent_table(), rel.parent_column())
            })
            .cloned()
            .collect();

        debug!(
            tables = tables.len(),
            relationships = relationships.len();
            "Schema filtered"
        );

        Schema {
            tables,
            relationships,
        }
    }
}

/// Builder for [`Schema`].
///
/// Adding tables cannot fail. Whether the result is consistent (every
/// foreign key pointing at a real column, no duplicate names) is a separate
/// question answered by the model crate's validator.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    tables: Vec<Table>,
}

impl SchemaBuilder {
    /// Adds the table declared by entity `E`.
    pub fn with_entity<E: Entity>(self) -> Self {
        self.with_table(E::table())
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Finishes the schema, deriving one relationship per foreign key column
    /// in declaration order.
    pub fn build(self) -> Schema {
        let relationships: Vec<Relationship> = self
            .tables
            .iter()
            .flat_map(|table| {
                table
                    .foreign_keys()
                    .map(move |(column, fk)| Relationship::from_foreign_key(table, column, fk))
            })
            .collect();

        trace!(tables = self.tables.len(), relationships = relationships.len(); "Schema built");

        Schema {
            tables: self.tables,
            relationships,
        }
    }
}
