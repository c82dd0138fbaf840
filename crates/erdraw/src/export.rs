//! Export functionality for erdraw diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a schema, or its laid-out form, into output bytes. It is the final
//! stage in the erdraw processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Schema
//!     ↓ prepare (validate, filter)
//! Schema
//!     ↓ structure            ↓ (Graphviz engine)
//! SchemaGraph                DOT graph
//!     ↓ layout                   ↓ dot
//! Layout                     PNG / JPG / SVG / PDF
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`markdown`] - the plain-text ER format via [`markdown::Markdown`]
//! - [`svg`] - native SVG via [`svg::SvgBuilder`] and [`svg::Svg`]
//! - `dot` - Graphviz DOT and everything Graphviz renders (feature `graphviz`)
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`ErdrawError::Export`] at the crate
//! boundary.
//!
//! [`ErdrawError::Export`]: crate::ErdrawError::Export

#[cfg(feature = "graphviz")]
pub mod dot;
pub mod markdown;
pub mod svg;

use std::{
    io::{self, Write},
    path::Path,
};

use log::{debug, error, info};
use tempfile::NamedTempFile;

/// Abstraction for diagram export backends.
///
/// Implementors hold whatever they render (a schema or a layout) and write
/// it in their output format.
pub trait Exporter {
    /// Writes the diagram to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted to the
    /// target format, or [`Error::Io`] if writing fails.
    fn export(&self, writer: &mut dyn Write) -> Result<(), Error>;

    /// Renders the diagram into memory.
    ///
    /// # Errors
    ///
    /// See [`Exporter::export`].
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buffer = Vec::new();
        self.export(&mut buffer)?;
        Ok(buffer)
    }
}

/// Writes `bytes` to `path`, replacing any existing file.
///
/// The content goes to a temporary file in the destination directory first
/// and is then moved over `path`, so a failed write never leaves a
/// truncated diagram behind.
///
/// # Errors
///
/// Returns [`Error::Io`] if the temporary file cannot be created or written,
/// or cannot be moved into place.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    info!(path:? = path, bytes = bytes.len(); "Writing diagram file");

    let mut file = NamedTempFile::new_in(dir).map_err(|err| {
        error!(dir:? = dir, err:err; "Failed to create temporary file");
        Error::Io(err)
    })?;
    file.write_all(bytes).map_err(|err| {
        error!(path:? = path, err:err; "Failed to write diagram content");
        Error::Io(err)
    })?;
    file.persist(path).map_err(|persist_err| {
        let err = persist_err.error;
        error!(path:? = path, err:err; "Failed to move diagram into place");
        Error::Io(err)
    })?;

    debug!(path:? = path; "Diagram file written");
    Ok(())
}

/// Errors that can occur during diagram export.
///
/// This type is converted into [`ErdrawError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`ErdrawError::Export`]: crate::ErdrawError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    struct Fixed(&'static str);

    impl Exporter for Fixed {
        fn export(&self, writer: &mut dyn Write) -> Result<(), Error> {
            writer.write_all(self.0.as_bytes())?;
            Ok(())
        }
    }

    #[test]
    fn test_to_bytes() {
        assert_eq!(Fixed("abc").to_bytes().unwrap(), b"abc");
    }

    #[test]
    fn test_write_file_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.er");

        write_file(&path, b"first").unwrap();
        write_file(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_file_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("diagram.er");

        let err = write_file(&path, b"content").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!path.exists());
    }
}
