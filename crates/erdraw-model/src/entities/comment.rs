use erdraw_core::schema::{Column, ColumnType, Entity, ForeignKey, Table};

use super::{Post, PostId, User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentId(pub i64);

/// A comment a user left on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub comment_text: String,
    pub author_id: UserId,
    pub post_id: PostId,
}

impl Entity for Comment {
    const TABLE: &'static str = "comment";

    fn table() -> Table {
        Table::new(Self::TABLE)
            .with_column(
                Column::new("id", ColumnType::Integer)
                    .primary_key()
                    .autoincrement(),
            )
            .with_column(Column::new("comment_text", ColumnType::varchar(255)).not_null())
            .with_column(
                Column::new("author_id", ColumnType::Integer)
                    .not_null()
                    .references(ForeignKey::new(User::TABLE, "id").with_names("author", "comments")),
            )
            .with_column(
                Column::new("post_id", ColumnType::Integer)
                    .not_null()
                    .references(ForeignKey::new(Post::TABLE, "id").with_names("post", "comments")),
            )
    }
}
