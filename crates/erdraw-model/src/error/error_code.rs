//! Error codes for the schema diagnostic system.
//!
//! Error codes are organized by what they check:
//! - `E1xx` - Table structure errors
//! - `E2xx` - Reference errors
//! - `E3xx` - Column type errors
//! - `Wxxx` - Warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Table Structure Errors (E1xx)
    // =========================================================================
    /// Duplicate table.
    ///
    /// Two tables in the schema share a name.
    E100,

    /// Duplicate column.
    ///
    /// Two columns in the same table share a name.
    E101,

    /// Missing primary key.
    ///
    /// A table has no column marked as primary key.
    E102,

    /// Empty table.
    ///
    /// A table declares no columns at all.
    E103,

    // =========================================================================
    // Reference Errors (E2xx)
    // =========================================================================
    /// Undefined table reference.
    ///
    /// A foreign key points at a table that is not part of the schema.
    E200,

    /// Undefined column reference.
    ///
    /// A foreign key points at a column that does not exist in its table.
    E201,

    /// Foreign key type mismatch.
    ///
    /// The foreign key column and the referenced column have different types.
    E202,

    /// Duplicate relationship name.
    ///
    /// Two relationships ending in the same table use the same name for
    /// that end.
    E203,

    /// Reference to a non-identifying column.
    ///
    /// A foreign key points at a column that is neither a primary key nor
    /// unique, so it cannot identify a row.
    E204,

    // =========================================================================
    // Column Type Errors (E3xx)
    // =========================================================================
    /// Empty enumeration.
    ///
    /// An enum column type lists no variants.
    E300,

    /// Zero-length string.
    ///
    /// A string column is bounded to zero characters.
    E301,

    /// Duplicate enumeration variant.
    ///
    /// An enum column type lists the same variant twice.
    E302,

    // =========================================================================
    // Warnings
    // =========================================================================
    /// Isolated table.
    ///
    /// A table takes part in no relationship; it is drawn unconnected.
    W001,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::W001 => "W001",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "duplicate table",
            ErrorCode::E101 => "duplicate column",
            ErrorCode::E102 => "missing primary key",
            ErrorCode::E103 => "empty table",
            ErrorCode::E200 => "undefined table",
            ErrorCode::E201 => "undefined column",
            ErrorCode::E202 => "foreign key type mismatch",
            ErrorCode::E203 => "duplicate relationship name",
            ErrorCode::E204 => "reference to non-identifying column",
            ErrorCode::E300 => "empty enumeration",
            ErrorCode::E301 => "zero-length string",
            ErrorCode::E302 => "duplicate enumeration variant",
            ErrorCode::W001 => "isolated table",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
