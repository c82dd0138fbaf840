//! Column definitions and column types.

use std::fmt;

use crate::identifier::Id;

/// The storage type of a column.
///
/// Only the types the diagram needs to show are modelled; the label produced
/// by [`fmt::Display`] is what ends up in the rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// A signed integer column.
    Integer,

    /// A character column, optionally bounded in length.
    String { max_len: Option<u32> },

    /// A column restricted to a closed set of string values.
    Enum { name: Id, variants: Vec<String> },
}

impl ColumnType {
    /// Shorthand for a bounded `String` column.
    pub fn varchar(max_len: u32) -> Self {
        Self::String {
            max_len: Some(max_len),
        }
    }

    /// Shorthand for a named enumeration.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdraw_core::schema::ColumnType;
    ///
    /// let ty = ColumnType::enumeration("media_types", ["image", "video"]);
    /// assert_eq!(ty.to_string(), "ENUM(image, video)");
    /// ```
    pub fn enumeration<I, S>(name: &str, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum {
            name: Id::new(name),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` when a foreign key of this type may reference a column
    /// of type `other`.
    ///
    /// Length bounds and enum members are ignored; only the kind matters.
    pub fn is_compatible_with(&self, other: &ColumnType) -> bool {
        matches!(
            (self, other),
            (ColumnType::Integer, ColumnType::Integer)
                | (ColumnType::String { .. }, ColumnType::String { .. })
                | (ColumnType::Enum { .. }, ColumnType::Enum { .. })
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "INTEGER"),
            ColumnType::String { max_len: Some(len) } => write!(f, "VARCHAR({len})"),
            ColumnType::String { max_len: None } => write!(f, "VARCHAR"),
            ColumnType::Enum { variants, .. } => write!(f, "ENUM({})", variants.join(", ")),
        }
    }
}

/// The target of a foreign key, plus the names the two ends of the
/// relationship go by.
///
/// `name` is how the child refers to the parent (a comment's `author`), and
/// `back_name` how the parent refers to its children (a user's `comments`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    table: Id,
    column: Id,
    name: Option<Id>,
    back_name: Option<Id>,
}

impl ForeignKey {
    /// Creates a foreign key referencing `table.column`.
    pub fn new(table: &str, column: &str) -> Self {
        Self {
            table: Id::new(table),
            column: Id::new(column),
            name: None,
            back_name: None,
        }
    }

    /// Names both ends of the relationship this foreign key creates.
    pub fn with_names(mut self, name: &str, back_name: &str) -> Self {
        self.name = Some(Id::new(name));
        self.back_name = Some(Id::new(back_name));
        self
    }

    /// The referenced table.
    pub fn table(&self) -> Id {
        self.table
    }

    /// The referenced column.
    pub fn column(&self) -> Id {
        self.column
    }

    pub fn name(&self) -> Option<Id> {
        self.name
    }

    pub fn back_name(&self) -> Option<Id> {
        self.back_name
    }
}

/// A single column of a table.
///
/// Columns start out nullable and unconstrained, mirroring SQL defaults;
/// the builder methods add constraints.
///
/// # Examples
///
/// ```
/// use erdraw_core::schema::{Column, ColumnType, ForeignKey};
///
/// let column = Column::new("post_id", ColumnType::Integer)
///     .not_null()
///     .references(ForeignKey::new("post", "id"));
///
/// assert!(!column.is_nullable());
/// assert_eq!(column.foreign_key().unwrap().table(), "post");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: Id,
    column_type: ColumnType,
    primary_key: bool,
    nullable: bool,
    unique: bool,
    autoincrement: bool,
    foreign_key: Option<ForeignKey>,
}

impl Column {
    /// Creates a nullable column with no constraints.
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: Id::new(name),
            column_type,
            primary_key: false,
            nullable: true,
            unique: false,
            autoincrement: false,
            foreign_key: None,
        }
    }

    /// Marks the column as (part of) the primary key. Key columns are never
    /// nullable.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Makes the column a foreign key.
    pub fn references(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_autoincrement(&self) -> bool {
        self.autoincrement
    }

    pub fn foreign_key(&self) -> Option<&ForeignKey> {
        self.foreign_key.as_ref()
    }
}
