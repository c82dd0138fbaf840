//! Configuration types for erdraw diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out, styled, filtered and written. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`LayoutConfig`] - Which [`Engine`] draws the diagram and in which [`Direction`].
//! - [`StyleConfig`] - Colors and font.
//! - [`Filter`] - Which tables and columns are drawn.
//! - [`OutputConfig`] - Where the diagram is written.
//!
//! # Example
//!
//! ```
//! # use erdraw::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.output().path().to_str(), Some("diagram.png"));
//! assert!(config.style().header_color().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use erdraw_core::{color::Color, schema::Filter};

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "diagram.png";

const DEFAULT_HEADER_COLOR: &str = "#dbe6f4";
const DEFAULT_EDGE_COLOR: &str = "#7f7f7f";
const DEFAULT_FONT: &str = "Helvetica";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    filter: Filter,

    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        layout: LayoutConfig,
        style: StyleConfig,
        filter: Filter,
        output: OutputConfig,
    ) -> Self {
        Self {
            layout,
            style,
            filter,
            output,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// The program that positions tables and edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Engine {
    /// Graphviz `dot`. Produces every format; requires the `graphviz` feature
    /// and the Graphviz binaries on `PATH`.
    Graphviz,

    /// The built-in layered layout. Produces SVG only.
    Native,
}

impl Default for Engine {
    fn default() -> Self {
        if cfg!(feature = "graphviz") {
            Engine::Graphviz
        } else {
            Engine::Native
        }
    }
}

/// The direction in which relationships flow, from parent to child tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    LeftRight,
    TopBottom,
}

impl Direction {
    /// The Graphviz `rankdir` value.
    pub fn rankdir(self) -> &'static str {
        match self {
            Direction::LeftRight => "LR",
            Direction::TopBottom => "TB",
        }
    }
}

/// Layout configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    engine: Engine,

    #[serde(default)]
    direction: Direction,
}

impl LayoutConfig {
    pub fn new(engine: Engine, direction: Direction) -> Self {
        Self { engine, direction }
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are kept as strings until used so that a bad value is reported
/// with the rest of the rendering errors.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    header_color: Option<String>,

    #[serde(default)]
    edge_color: Option<String>,

    #[serde(default)]
    font: Option<String>,
}

impl StyleConfig {
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_header_color(mut self, color: impl Into<String>) -> Self {
        self.header_color = Some(color.into());
        self
    }

    pub fn with_edge_color(mut self, color: impl Into<String>) -> Self {
        self.edge_color = Some(color.into());
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Returns the parsed background [`Color`], or `None` for a transparent
    /// background.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the fill color of table headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn header_color(&self) -> Result<Color, String> {
        Color::new(self.header_color.as_deref().unwrap_or(DEFAULT_HEADER_COLOR))
            .map_err(|err| format!("Invalid header color in config: {err}"))
    }

    /// Returns the color of relationship edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn edge_color(&self) -> Result<Color, String> {
        Color::new(self.edge_color.as_deref().unwrap_or(DEFAULT_EDGE_COLOR))
            .map_err(|err| format!("Invalid edge color in config: {err}"))
    }

    /// Returns the font family used for all text.
    pub fn font(&self) -> &str {
        self.font.as_deref().unwrap_or(DEFAULT_FONT)
    }
}

/// Where the rendered diagram goes.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    path: PathBuf,
}

impl OutputConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The output file. Its extension selects the [`Format`](crate::Format).
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = StyleConfig::default();

        assert_eq!(style.background_color().unwrap(), None);
        assert_eq!(style.header_color().unwrap().to_hex(), DEFAULT_HEADER_COLOR);
        assert_eq!(style.edge_color().unwrap().to_hex(), DEFAULT_EDGE_COLOR);
        assert_eq!(style.font(), "Helvetica");
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let style = StyleConfig::default().with_edge_color("not-a-color");

        let err = style.edge_color().unwrap_err();
        assert!(err.starts_with("Invalid edge color in config"));
    }

    #[test]
    fn test_direction_rankdir() {
        assert_eq!(Direction::default().rankdir(), "LR");
        assert_eq!(Direction::TopBottom.rankdir(), "TB");
    }

    #[test]
    fn test_default_output() {
        let config = AppConfig::default();

        assert_eq!(config.output().path(), Path::new("diagram.png"));
        assert!(config.filter().is_empty());
    }
}
