//! CLI logic for the erdraw diagram tool.
//!
//! The tool takes no input file: it declares the built-in social network
//! schema, renders it to the configured output path and tells the user how
//! it went.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    io::{self, Write},
    path::Path,
};

use log::{error, info};

use erdraw::{DiagramBuilder, ErdrawError, Renderer, schema::Schema};

/// Printed after the diagram has been written.
const SUCCESS_MESSAGE: &str = "Success! Check the";

/// Printed when anything on the way to the diagram fails.
const FAILURE_MESSAGE: &str = "There was a problem generating the diagram";

/// Run the erdraw CLI application
///
/// Loads the configuration, declares the schema and renders it to the
/// configured output path, reporting the outcome on standard output.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ErdrawError` for:
/// - Configuration loading errors
/// - Schema validation errors
/// - Layout and rendering errors
/// - File I/O errors
pub fn run(args: &Args) -> Result<(), ErdrawError> {
    run_with_output(args, &mut io::stdout().lock())
}

/// Same as [`run`], with the outcome line written to `out`.
///
/// Every failure, including a configuration that cannot be loaded, writes
/// the failure line before the error is returned.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_output<W: Write>(args: &Args, out: &mut W) -> Result<(), ErdrawError> {
    let app_config = match config::load_config(args.config.as_ref()) {
        Ok(app_config) => app_config,
        Err(err) => {
            report_failure(out);
            return Err(err);
        }
    };
    let output = app_config.output().path().to_path_buf();

    info!(output_path:? = output; "Generating diagram");

    let schema = erdraw_model::declare();
    let builder = DiagramBuilder::new(app_config);

    generate(&builder, &schema, &output, out)
}

/// Render `schema` to `output` and report the outcome on `out`.
///
/// On success a single line naming the output file is written. On failure
/// the failure line is written and the renderer's error is returned
/// unchanged.
///
/// # Errors
///
/// Returns the renderer's error, or an I/O error if the success line
/// cannot be written.
pub fn generate<R, W>(
    renderer: &R,
    schema: &Schema,
    output: &Path,
    out: &mut W,
) -> Result<(), ErdrawError>
where
    R: Renderer + ?Sized,
    W: Write,
{
    match renderer.render(schema, output) {
        Ok(()) => {
            let file_name = output
                .file_name()
                .map_or_else(|| output.display().to_string(), |name| {
                    name.to_string_lossy().into_owned()
                });
            writeln!(out, "{SUCCESS_MESSAGE} {file_name} file")?;
            info!(output_path:? = output; "Diagram generated");
            Ok(())
        }
        Err(err) => {
            report_failure(out);
            Err(err)
        }
    }
}

/// Writes the failure line. A broken `out` is logged, so the error that
/// caused the failure is the one returned to the caller.
fn report_failure<W: Write>(out: &mut W) {
    if let Err(write_err) = writeln!(out, "{FAILURE_MESSAGE}") {
        error!(err:err = write_err; "Failed to report failure");
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, fs};

    use super::*;

    struct WritingRenderer;

    impl Renderer for WritingRenderer {
        fn render(&self, _schema: &Schema, output: &Path) -> Result<(), ErdrawError> {
            fs::write(output, b"diagram")?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct FailingRenderer {
        calls: Cell<usize>,
    }

    impl Renderer for FailingRenderer {
        fn render(&self, _schema: &Schema, _output: &Path) -> Result<(), ErdrawError> {
            self.calls.set(self.calls.get() + 1);
            Err(ErdrawError::Layout("boom".to_string()))
        }
    }

    #[test]
    fn test_success_reports_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("diagram.png");
        let mut out = Vec::new();

        generate(&WritingRenderer, &erdraw_model::declare(), &output, &mut out).unwrap();

        assert!(output.exists());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Success! Check the diagram.png file\n"
        );
    }

    #[test]
    fn test_failure_reports_and_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("diagram.png");
        let renderer = FailingRenderer::default();
        let mut out = Vec::new();

        let err = generate(&renderer, &erdraw_model::declare(), &output, &mut out).unwrap_err();

        assert!(matches!(err, ErdrawError::Layout(ref msg) if msg == "boom"));
        assert_eq!(renderer.calls.get(), 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "There was a problem generating the diagram\n"
        );
        assert!(!output.exists());
    }

    #[test]
    fn test_renderer_can_be_a_trait_object() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("diagram.er");
        let renderer: &dyn Renderer = &DiagramBuilder::default();
        let mut out = Vec::new();

        generate(renderer, &erdraw_model::declare(), &output, &mut out).unwrap();

        assert!(fs::read_to_string(&output).unwrap().contains("[follower]"));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Success! Check the diagram.er file\n"
        );
    }
}
