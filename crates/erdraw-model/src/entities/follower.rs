use erdraw_core::schema::{Column, ColumnType, Entity, ForeignKey, Table};

use super::{User, UserId};

/// A directed "follows" edge: `user_from_id` follows `user_to_id`.
///
/// The pair is the identity; there is no surrogate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Follower {
    pub user_from_id: UserId,
    pub user_to_id: UserId,
}

impl Entity for Follower {
    const TABLE: &'static str = "follower";

    fn table() -> Table {
        Table::new(Self::TABLE)
            .with_column(
                Column::new("user_from_id", ColumnType::Integer)
                    .primary_key()
                    .references(
                        ForeignKey::new(User::TABLE, "id").with_names("follower", "following"),
                    ),
            )
            .with_column(
                Column::new("user_to_id", ColumnType::Integer)
                    .primary_key()
                    .references(
                        ForeignKey::new(User::TABLE, "id").with_names("followed", "followers"),
                    ),
            )
    }
}
