//! Identifier management using string interning for efficient string storage and comparison
//!
//! Table, column and relationship names are all stored as [`Id`] values.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Efficient identifier type using string interning
///
/// Two identifiers built from the same name compare equal and hash the same,
/// and copying one is as cheap as copying an integer.
///
/// # Examples
///
/// ```
/// use erdraw_core::identifier::Id;
///
/// let table = Id::new("comment");
/// let column = Id::new("post_id");
///
/// let path = table.qualify(column);
/// assert_eq!(path, "comment.post_id");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates a qualified ID by joining this ID and `member` with a '.' separator.
    ///
    /// Used to address a column inside its table, as in `post.user_id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdraw_core::identifier::Id;
    ///
    /// let qualified = Id::new("media").qualify(Id::new("url"));
    /// assert_eq!(qualified, "media.url");
    /// ```
    pub fn qualify(&self, member: Id) -> Self {
        let mut interner = interner();
        let owner_str = interner.resolve(self.0).unwrap_or_default();
        let member_str = interner.resolve(member.0).unwrap_or_default();
        let qualified = format!("{owner_str}.{member_str}");
        Self(interner.get_or_intern(&qualified))
    }

    /// Returns an owned copy of the string this identifier stands for.
    pub fn to_name(&self) -> String {
        interner().resolve(self.0).unwrap_or_default().to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.to_name();
        f.write_str(&name)
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
