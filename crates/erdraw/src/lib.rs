//! erdraw - Entity-relationship diagrams for declared schemas.
//!
//! Validation, filtering, layout and rendering of a
//! [`Schema`](schema::Schema) into a diagram file. Raster and PDF output
//! go through Graphviz (feature `graphviz`); SVG can also be drawn by the
//! built-in layered layout, and the plain-text ER format needs no external
//! tool at all.

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;
mod format;

pub use erdraw_core::{color, geometry, identifier, schema};

pub use error::ErdrawError;
pub use format::Format;

use std::path::Path;

use log::{debug, info, trace};

use erdraw_core::schema::Schema;

use config::{AppConfig, Engine};
use export::{Exporter, markdown::Markdown, svg::SvgBuilder};
use layout::LayoutEngine;
use structure::SchemaGraph;

/// Something that turns a schema into a diagram file.
///
/// The application depends on this trait only, so the drawing backend can
/// be swapped, or replaced by a stub in tests.
pub trait Renderer {
    /// Renders `schema` to the file at `output`, replacing it if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`ErdrawError`] if the schema is invalid, the output format
    /// is not supported, layout fails or the file cannot be written.
    fn render(&self, schema: &Schema, output: &Path) -> Result<(), ErdrawError>;
}

/// Builder for validating and rendering erdraw diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use erdraw::{DiagramBuilder, Renderer, config::AppConfig};
///
/// let schema = erdraw_model::declare();
///
/// // With custom config
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Render to a file; the extension picks the format
/// builder
///     .render(&schema, Path::new("diagram.png"))
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout, style,
    ///   filter and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validate a schema and apply the configured filter.
    ///
    /// Validation runs on the whole schema, before filtering, so a filter
    /// cannot hide a broken reference.
    ///
    /// # Errors
    ///
    /// Returns [`ErdrawError::Model`] with every diagnostic if validation
    /// fails, or [`ErdrawError::Graph`] if the filter leaves no table.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdraw::DiagramBuilder;
    ///
    /// let schema = erdraw_model::declare();
    /// let prepared = DiagramBuilder::default().prepare(&schema).unwrap();
    /// assert_eq!(prepared, schema);
    /// ```
    pub fn prepare(&self, schema: &Schema) -> Result<Schema, ErdrawError> {
        info!(tables = schema.len(); "Preparing schema");

        erdraw_model::validate(schema)?;

        let filtered = schema.filtered(self.config.filter());
        if filtered.is_empty() {
            return Err(ErdrawError::Graph(
                "the configured filter removed every table".to_string(),
            ));
        }

        debug!(
            tables = filtered.len(),
            relationships = filtered.relationships().len();
            "Schema prepared"
        );
        trace!(schema:? = filtered; "Prepared schema");

        Ok(filtered)
    }

    /// Render a schema in the plain-text ER format.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdraw::DiagramBuilder;
    ///
    /// let schema = erdraw_model::declare();
    /// let text = DiagramBuilder::default().render_markdown(&schema);
    /// assert!(text.starts_with("[user]\n    *id {label:\"INTEGER\"}"));
    /// assert!(text.contains("post *--1 user"));
    /// ```
    pub fn render_markdown(&self, schema: &Schema) -> String {
        Markdown::new(schema).to_string()
    }

    /// Render a schema to Graphviz DOT source.
    ///
    /// # Errors
    ///
    /// Returns [`ErdrawError::Export`] if a configured color is invalid.
    #[cfg(feature = "graphviz")]
    pub fn render_dot(&self, schema: &Schema) -> Result<String, ErdrawError> {
        info!("Rendering DOT source");
        let dot = self.dot_builder(schema).build()?;
        Ok(dot.to_dot_string())
    }

    #[cfg(feature = "graphviz")]
    fn dot_builder<'a>(&self, schema: &'a Schema) -> export::dot::DotBuilder<'a> {
        export::dot::DotBuilder::new(schema)
            .with_style(self.config.style())
            .with_direction(self.config.layout().direction())
    }

    /// Render a schema to SVG with the built-in layout.
    ///
    /// # Errors
    ///
    /// Returns [`ErdrawError::Graph`] or [`ErdrawError::Layout`] if the
    /// schema cannot be laid out, or [`ErdrawError::Export`] if a configured
    /// color is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdraw::DiagramBuilder;
    ///
    /// let schema = erdraw_model::declare();
    /// let svg = DiagramBuilder::default().render_svg(&schema).unwrap();
    /// assert!(svg.contains("table-follower"));
    /// ```
    pub fn render_svg(&self, schema: &Schema) -> Result<String, ErdrawError> {
        info!(tables = schema.len(); "Building schema graph");
        let graph = SchemaGraph::from_schema(schema)?;

        let layout = LayoutEngine::new(self.config.layout().direction()).calculate(&graph)?;
        info!(tables = layout.tables().len(); "Layout calculated");

        let svg = SvgBuilder::new(&layout)
            .with_style(self.config.style())
            .build()?;
        let bytes = svg.to_bytes()?;

        String::from_utf8(bytes).map_err(|err| ErdrawError::Export(Box::new(err)))
    }

    /// Render a schema to the bytes of `format`, using the configured
    /// engine where there is a choice.
    ///
    /// The schema is rendered as given; see [`DiagramBuilder::prepare`].
    ///
    /// # Errors
    ///
    /// Returns [`ErdrawError::UnsupportedFormat`] if the format needs
    /// Graphviz and either the `graphviz` feature is disabled or the native
    /// engine is configured. Rendering errors are passed through.
    pub fn render_bytes(&self, schema: &Schema, format: Format) -> Result<Vec<u8>, ErdrawError> {
        let engine = self.config.layout().engine();
        debug!(format:% = format, engine:? = engine; "Rendering");

        match (format, engine) {
            (Format::Markdown, _) => Ok(self.render_markdown(schema).into_bytes()),
            (Format::Svg, Engine::Native) => Ok(self.render_svg(schema)?.into_bytes()),
            (_, Engine::Native) if format.needs_graphviz() => {
                Err(ErdrawError::UnsupportedFormat(format!(
                    "{format} output requires the Graphviz engine"
                )))
            }
            _ => self.render_with_graphviz(schema, format),
        }
    }

    #[cfg(feature = "graphviz")]
    fn render_with_graphviz(&self, schema: &Schema, format: Format) -> Result<Vec<u8>, ErdrawError> {
        let dot = self.dot_builder(schema).with_format(format).build()?;
        Ok(dot.to_bytes()?)
    }

    #[cfg(not(feature = "graphviz"))]
    fn render_with_graphviz(&self, _schema: &Schema, format: Format) -> Result<Vec<u8>, ErdrawError> {
        Err(ErdrawError::UnsupportedFormat(format!(
            "{format} output requires the `graphviz` feature"
        )))
    }
}

impl Renderer for DiagramBuilder {
    fn render(&self, schema: &Schema, output: &Path) -> Result<(), ErdrawError> {
        let format = Format::from_path(output)?;
        info!(path:? = output, format:% = format; "Rendering diagram");

        let prepared = self.prepare(schema)?;
        let bytes = self.render_bytes(&prepared, format)?;
        export::write_file(output, &bytes)?;

        info!(path:? = output; "Diagram rendered successfully");
        Ok(())
    }
}
