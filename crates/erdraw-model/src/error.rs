//! Error and diagnostic system for schema validation.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Multiple labels pointing at schema paths such as `comment.post_id`
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Example
//!
//! ```
//! # use erdraw_model::error::{Diagnostic, ErrorCode};
//!
//! let diag = Diagnostic::error("table `user` is declared multiple times")
//!     .with_code(ErrorCode::E100)
//!     .with_label("user", "duplicate declaration")
//!     .with_help("remove the duplicate or rename one of the tables");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod model_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use model_error::ModelError;
pub use severity::Severity;
