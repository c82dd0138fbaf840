//! Relationships between tables.
//!
//! Every relationship is a single directed ownership edge from a child table
//! (the one holding the foreign key column) to a parent table. Parents keep
//! no back-pointers; the reverse direction is answered by
//! [`Schema::referencing`](crate::schema::Schema::referencing).

use std::fmt;

use crate::{
    identifier::Id,
    schema::{Column, ForeignKey, Table},
};

/// How many rows may sit at one end of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    ZeroOrOne,
    ExactlyOne,
    ZeroOrMore,
    OneOrMore,
}

impl Cardinality {
    /// The single-character form used by the ER markdown format.
    pub fn symbol(self) -> char {
        match self {
            Cardinality::ZeroOrOne => '?',
            Cardinality::ExactlyOne => '1',
            Cardinality::ZeroOrMore => '*',
            Cardinality::OneOrMore => '+',
        }
    }

    /// The label drawn next to an edge end.
    pub fn label(self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "0..1",
            Cardinality::ExactlyOne => "1",
            Cardinality::ZeroOrMore => "0..N",
            Cardinality::OneOrMore => "1..N",
        }
    }

    /// Returns `true` if this end may hold more than one row.
    pub fn is_many(self) -> bool {
        matches!(self, Cardinality::ZeroOrMore | Cardinality::OneOrMore)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A foreign key edge from `table.column` to `parent_table.parent_column`.
///
/// Relationships are derived from the foreign key columns of a schema's
/// tables; they are never declared on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    table: Id,
    column: Id,
    parent_table: Id,
    parent_column: Id,
    name: Id,
    back_name: Id,
    cardinality: Cardinality,
    parent_cardinality: Cardinality,
}

impl Relationship {
    /// Derives the relationship a foreign key column of `table` creates.
    ///
    /// Unnamed ends fall back to the parent table name for the child side
    /// and the child table name for the parent side.
    pub fn from_foreign_key(table: &Table, column: &Column, foreign_key: &ForeignKey) -> Self {
        let name = foreign_key.name().unwrap_or_else(|| foreign_key.table());
        let back_name = foreign_key.back_name().unwrap_or_else(|| table.name());
        let parent_cardinality = if column.is_nullable() {
            Cardinality::ZeroOrOne
        } else {
            Cardinality::ExactlyOne
        };

        Self {
            table: table.name(),
            column: column.name(),
            parent_table: foreign_key.table(),
            parent_column: foreign_key.column(),
            name,
            back_name,
            cardinality: Cardinality::ZeroOrMore,
            parent_cardinality,
        }
    }

    /// The child table, which holds the foreign key.
    pub fn table(&self) -> Id {
        self.table
    }

    /// The foreign key column in the child table.
    pub fn column(&self) -> Id {
        self.column
    }

    pub fn parent_table(&self) -> Id {
        self.parent_table
    }

    pub fn parent_column(&self) -> Id {
        self.parent_column
    }

    /// How a child row refers to its parent.
    pub fn name(&self) -> Id {
        self.name
    }

    /// How a parent row refers to its children.
    pub fn back_name(&self) -> Id {
        self.back_name
    }

    /// Number of child rows per parent row.
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Number of parent rows per child row.
    pub fn parent_cardinality(&self) -> Cardinality {
        self.parent_cardinality
    }

    /// Returns `true` if the edge starts and ends in the same table.
    pub fn is_self_referencing(&self) -> bool {
        self.table == self.parent_table
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}--{} {}",
            self.table,
            self.cardinality.symbol(),
            self.parent_cardinality.symbol(),
            self.parent_table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    #[test]
    fn test_cardinality_symbols() {
        assert_eq!(Cardinality::ZeroOrOne.symbol(), '?');
        assert_eq!(Cardinality::ExactlyOne.symbol(), '1');
        assert_eq!(Cardinality::ZeroOrMore.symbol(), '*');
        assert_eq!(Cardinality::OneOrMore.symbol(), '+');
        assert!(Cardinality::OneOrMore.is_many());
        assert!(!Cardinality::ExactlyOne.is_many());
    }

    #[test]
    fn test_named_relationship() {
        let column = Column::new("author_id", ColumnType::Integer)
            .not_null()
            .references(ForeignKey::new("user", "id").with_names("author", "comments"));
        let table = Table::new("comment").with_column(column.clone());
        let fk = column.foreign_key().unwrap();

        let rel = Relationship::from_foreign_key(&table, &column, fk);

        assert_eq!(rel.table(), "comment");
        assert_eq!(rel.column(), "author_id");
        assert_eq!(rel.parent_table(), "user");
        assert_eq!(rel.parent_column(), "id");
        assert_eq!(rel.name(), "author");
        assert_eq!(rel.back_name(), "comments");
        assert_eq!(rel.parent_cardinality(), Cardinality::ExactlyOne);
        assert_eq!(rel.to_string(), "comment *--1 user");
    }

    #[test]
    fn test_default_names_and_nullable_parent() {
        let column =
            Column::new("post_id", ColumnType::Integer).references(ForeignKey::new("post", "id"));
        let table = Table::new("media").with_column(column.clone());
        let fk = column.foreign_key().unwrap();

        let rel = Relationship::from_foreign_key(&table, &column, fk);

        assert_eq!(rel.name(), "post");
        assert_eq!(rel.back_name(), "media");
        assert_eq!(rel.parent_cardinality(), Cardinality::ZeroOrOne);
        assert!(!rel.is_self_referencing());
    }

    #[test]
    fn test_default_child_name_is_parent_table() {
        let column =
            Column::new("author_id", ColumnType::Integer).references(ForeignKey::new("user", "id"));
        let table = Table::new("comment").with_column(column.clone());
        let fk = column.foreign_key().unwrap();

        let rel = Relationship::from_foreign_key(&table, &column, fk);

        assert_eq!(rel.name(), "user");
        assert_eq!(rel.back_name(), "comment");
    }
}
