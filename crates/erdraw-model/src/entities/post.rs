use erdraw_core::schema::{Column, ColumnType, Entity, ForeignKey, Table};

use super::{User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

/// A post published by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
}

impl Entity for Post {
    const TABLE: &'static str = "post";

    fn table() -> Table {
        Table::new(Self::TABLE)
            .with_column(
                Column::new("id", ColumnType::Integer)
                    .primary_key()
                    .autoincrement(),
            )
            .with_column(
                Column::new("user_id", ColumnType::Integer)
                    .not_null()
                    .references(ForeignKey::new(User::TABLE, "id").with_names("user", "posts")),
            )
    }
}
