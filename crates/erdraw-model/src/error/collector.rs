//! Collector for accumulating diagnostics during validation.

use log::warn;

use crate::error::{Diagnostic, ModelError};

/// Accumulates diagnostics so validation can report every problem at once
/// instead of stopping at the first.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ModelError)` with all diagnostics,
    ///   errors ahead of warnings.
    /// - If there are only warnings, they are logged and `Ok(())` is returned.
    pub fn finish(mut self) -> Result<(), ModelError> {
        if self.has_errors {
            self.diagnostics.sort_by_key(|d| d.severity().is_warning());
            return Err(ModelError::new(self.diagnostics));
        }

        for diagnostic in &self.diagnostics {
            warn!(code:? = diagnostic.code(); "{diagnostic}");
        }
        Ok(())
    }
}
