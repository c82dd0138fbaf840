//! Labels attach a message to a location in the schema.

use std::fmt;

use erdraw_core::identifier::Id;

/// A labeled schema location within a diagnostic.
///
/// The location is a schema path: a table name (`user`) or a qualified
/// column (`comment.post_id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    path: Id,
    message: String,
    primary: bool,
}

impl Label {
    /// Create a primary label (the main location of the issue).
    pub fn primary(path: impl Into<Id>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(path: impl Into<Id>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            primary: false,
        }
    }

    pub fn path(&self) -> Id {
        self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.primary
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
