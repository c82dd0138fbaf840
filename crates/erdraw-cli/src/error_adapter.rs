//! Error adapter for converting ErdrawError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`erdraw_model::ModelError`] contains multiple diagnostics, each
//! diagnostic is rendered independently.
//!
//! The schema is declared in code, so there is no source text to point
//! into. Each diagnostic gets a small listing of the schema paths its labels
//! name, one per line, and the labels point at those lines.

use std::{
    error::Error as _,
    fmt,
    io::{self, Write},
};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use erdraw::ErdrawError;
use erdraw_model::error::{Diagnostic, Severity};

/// Adapter for a single schema diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Listing of the labelled schema paths
    src: String,
    /// Span of each label within `src`
    spans: Vec<SourceSpan>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic) -> Self {
        let mut src = String::new();
        let mut spans = Vec::with_capacity(diag.labels().len());
        for label in diag.labels() {
            let path = label.path().to_name();
            spans.push(SourceSpan::new(src.len().into(), path.len()));
            src.push_str(&path);
            src.push('\n');
        }

        Self { diag, src, spans }
    }

    /// The text the labels point into.
    pub fn source(&self) -> &str {
        &self.src
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        if self.src.is_empty() {
            return None;
        }
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().zip(&self.spans).map(|(label, span)| {
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, *span)
            } else {
                LabeledSpan::new_with_span(message, *span)
            }
        })))
    }
}

/// Adapter for non-diagnostic [`ErdrawError`] variants.
///
/// This adapter handles errors that don't have rich diagnostic information,
/// such as I/O, configuration, layout and export errors.
pub struct ErrorAdapter<'a>(pub &'a ErdrawError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ErdrawError::Io(_) => "erdraw::io",
            ErdrawError::Model { .. } => return None,
            ErdrawError::Config(_) => "erdraw::config",
            ErdrawError::Graph(_) => "erdraw::graph",
            ErdrawError::Layout(_) => "erdraw::layout",
            ErdrawError::Export(_) => "erdraw::export",
            ErdrawError::UnsupportedFormat(_) => "erdraw::format",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ErdrawError::UnsupportedFormat(_) => {
                "use one of the extensions .png, .jpg, .svg, .pdf, .dot or .er"
            }
            ErdrawError::Config(_) => "check the `[layout]`, `[style]`, `[filter]` and `[output]` tables",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A schema diagnostic with labelled paths.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without labels.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`ErdrawError`] into a list of reportable errors.
///
/// For [`ErdrawError::Model`], this returns one [`Reportable`] for
/// each diagnostic in the error. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &ErdrawError) -> Vec<Reportable<'_>> {
    match err {
        ErdrawError::Model { err: model_err } => model_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Render every [`Reportable`] of `err` with miette and write them to `out`.
///
/// # Errors
///
/// Returns an I/O error if `out` cannot be written.
pub fn write_reports<W: Write>(err: &ErdrawError, out: &mut W) -> io::Result<()> {
    let reporter = miette::GraphicalReportHandler::new();

    // One report per diagnostic
    for reportable in to_reportables(err) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_err() {
            writer = format!("Error: {reportable}");
        }
        writeln!(out, "{writer}")?;
    }

    Ok(())
}
