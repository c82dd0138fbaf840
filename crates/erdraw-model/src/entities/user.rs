use erdraw_core::schema::{Column, ColumnType, Entity, Table};

/// Primary key of a [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

/// A registered account.
///
/// A user's posts, comments and follower edges are not stored here. Each of
/// those rows points at its user, and the schema answers the reverse
/// question through [`Schema::referencing`](erdraw_core::schema::Schema::referencing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl Entity for User {
    const TABLE: &'static str = "user";

    fn table() -> Table {
        Table::new(Self::TABLE)
            .with_column(
                Column::new("id", ColumnType::Integer)
                    .primary_key()
                    .autoincrement(),
            )
            .with_column(
                Column::new("username", ColumnType::varchar(50))
                    .unique()
                    .not_null(),
            )
            .with_column(Column::new("firstname", ColumnType::varchar(50)).not_null())
            .with_column(Column::new("lastname", ColumnType::varchar(50)).not_null())
            .with_column(
                Column::new("email", ColumnType::varchar(100))
                    .unique()
                    .not_null(),
            )
    }
}
