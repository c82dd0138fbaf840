//! Error types for erdraw operations.
//!
//! This module provides the main error type [`ErdrawError`] which wraps
//! the error conditions that can occur while turning a schema into a
//! diagram file.

use std::io;

use thiserror::Error;

use erdraw_model::ModelError;

/// The main error type for erdraw operations.
///
/// # Diagnostic Variants
///
/// The `Model` variant carries the validator's structured diagnostics
/// (error codes, labeled schema paths, help text) for rich reporting.
#[derive(Debug, Error)]
pub enum ErdrawError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Model { err: ModelError },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(#[source] Box<dyn std::error::Error>),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

impl From<ModelError> for ErdrawError {
    fn from(err: ModelError) -> Self {
        Self::Model { err }
    }
}

impl From<crate::export::Error> for ErdrawError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
