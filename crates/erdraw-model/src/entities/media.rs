use std::{fmt, str::FromStr};

use erdraw_core::schema::{Column, ColumnType, Entity, ForeignKey, Table};

use super::{Post, PostId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(pub i64);

/// The kind of file a [`Media`] row points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Every kind, in declaration order.
    pub const ALL: [MediaKind; 2] = [MediaKind::Image, MediaKind::Video];

    /// Name of the enumerated column type.
    pub const TYPE_NAME: &'static str = "media_types";

    /// The stored value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// The column type restricting a column to exactly these kinds.
    pub fn column_type() -> ColumnType {
        ColumnType::enumeration(Self::TYPE_NAME, Self::ALL.map(MediaKind::as_str))
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown media kind `{s}`, expected one of: image, video"))
    }
}

/// An image or video attached to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: MediaId,
    pub kind: MediaKind,
    pub url: String,
    pub post_id: PostId,
}

impl Entity for Media {
    const TABLE: &'static str = "media";

    fn table() -> Table {
        Table::new(Self::TABLE)
            .with_column(
                Column::new("id", ColumnType::Integer)
                    .primary_key()
                    .autoincrement(),
            )
            .with_column(Column::new("type", MediaKind::column_type()).not_null())
            .with_column(Column::new("url", ColumnType::varchar(255)).not_null())
            .with_column(
                Column::new("post_id", ColumnType::Integer)
                    .not_null()
                    .references(ForeignKey::new(Post::TABLE, "id").with_names("post", "media")),
            )
    }
}
