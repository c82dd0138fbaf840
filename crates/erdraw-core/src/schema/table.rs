//! Table definitions.

use crate::{
    identifier::Id,
    schema::{Column, ForeignKey},
};

/// A named table with an ordered list of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: Id,
    columns: Vec<Column>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(name: &str) -> Self {
        Self {
            name: Id::new(name),
            columns: Vec::new(),
        }
    }

    /// Appends a column, keeping declaration order.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name.
    pub fn column(&self, name: impl Into<Id>) -> Option<&Column> {
        let name = name.into();
        self.columns.iter().find(|column| column.name() == name)
    }

    /// Returns the primary key columns. More than one column means a
    /// composite key.
    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.is_primary_key())
    }

    /// Returns every foreign key column together with its target.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&Column, &ForeignKey)> {
        self.columns
            .iter()
            .filter_map(|column| column.foreign_key().map(|fk| (column, fk)))
    }

    /// Returns a copy of this table keeping only the columns `keep` accepts.
    pub(crate) fn retain_columns(&self, mut keep: impl FnMut(&Column) -> bool) -> Self {
        Self {
            name: self.name,
            columns: self
                .columns
                .iter()
                .filter(|column| keep(*column))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    fn follower_table() -> Table {
        Table::new("follower")
            .with_column(
                Column::new("user_from_id", ColumnType::Integer)
                    .primary_key()
                    .references(ForeignKey::new("user", "id")),
            )
            .with_column(
                Column::new("user_to_id", ColumnType::Integer)
                    .primary_key()
                    .references(ForeignKey::new("user", "id")),
            )
    }

    #[test]
    fn test_composite_primary_key() {
        let table = follower_table();
        let key: Vec<_> = table.primary_key().map(|c| c.name().to_name()).collect();

        assert_eq!(key, vec!["user_from_id", "user_to_id"]);
    }

    #[test]
    fn test_column_lookup() {
        let table = follower_table();

        assert!(table.column("user_to_id").is_some());
        assert!(table.column("id").is_none());
    }

    #[test]
    fn test_foreign_keys() {
        let table = follower_table();
        let targets: Vec<_> = table
            .foreign_keys()
            .map(|(column, fk)| format!("{} -> {}", column.name(), fk.table().qualify(fk.column())))
            .collect();

        assert_eq!(targets, vec!["user_from_id -> user.id", "user_to_id -> user.id"]);
    }

    #[test]
    fn test_retain_columns() {
        let table = follower_table().retain_columns(|c| c.name() == "user_to_id");

        assert_eq!(table.name(), "follower");
        assert_eq!(table.columns().len(), 1);
    }
}
