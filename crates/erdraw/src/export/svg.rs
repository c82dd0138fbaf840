//! Native SVG export.
//!
//! Draws a [`Layout`] with the `svg` crate: one group per table (header band,
//! name, one text line per column) and one polyline per relationship with
//! its two cardinality labels. Primary key columns are underlined and
//! foreign key columns are set in italics.

use std::io::Write;

use log::{debug, info};
use svg::{self, Document, node::element as svg_element};

use erdraw_core::{
    color::Color,
    geometry::{Bounds, Point},
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    layout::{EdgeRoute, Layout, TableBox, column_label},
};

/// Distance between an edge end and its cardinality label.
const LABEL_OFFSET: f32 = 6.0;

/// Builder for [`Svg`].
///
/// Colors from the [`StyleConfig`] are parsed by [`SvgBuilder::build`], so
/// a bad color is reported before anything is drawn.
pub struct SvgBuilder<'a> {
    layout: &'a Layout<'a>,
    style: StyleConfig,
}

impl<'a> SvgBuilder<'a> {
    pub fn new(layout: &'a Layout<'a>) -> Self {
        Self {
            layout,
            style: StyleConfig::default(),
        }
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Resolves the style and returns the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed.
    pub fn build(self) -> Result<Svg<'a>, Error> {
        Ok(Svg {
            layout: self.layout,
            background_color: self.style.background_color().map_err(Error::Render)?,
            header_color: self.style.header_color().map_err(Error::Render)?,
            edge_color: self.style.edge_color().map_err(Error::Render)?,
            font: self.style.font().to_string(),
        })
    }
}

/// SVG exporter for a laid-out schema.
pub struct Svg<'a> {
    layout: &'a Layout<'a>,
    background_color: Option<Color>,
    header_color: Color,
    edge_color: Color,
    font: String,
}

impl Svg<'_> {
    /// Builds the complete SVG document.
    pub fn render_document(&self) -> Document {
        let bounds = self.layout.bounds();

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", bounds.width(), bounds.height()),
            )
            .set("width", bounds.width())
            .set("height", bounds.height());

        if let Some(color) = self.background_color {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", color)
                    .set("fill-opacity", color.alpha()),
            );
        }

        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!("translate({}, {})", -bounds.min_x(), -bounds.min_y()),
        );

        // Edges go first so tables are drawn over their ends.
        for edge in self.layout.edges() {
            main_group = main_group.add(self.render_edge(edge));
        }
        for table_box in self.layout.tables() {
            main_group = main_group.add(self.render_table(table_box));
        }

        debug!(
            tables = self.layout.tables().len(),
            edges = self.layout.edges().len();
            "SVG document rendered"
        );

        doc.add(main_group)
    }

    fn text(&self, position: Point, content: &str) -> svg_element::Text {
        svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("dominant-baseline", "central")
            .set("font-family", self.font.as_str())
            .set("font-size", self.layout.font_size())
            .add(svg::node::Text::new(content))
    }

    fn render_table(&self, table_box: &TableBox) -> svg_element::Group {
        let table = table_box.table();
        let bounds = table_box.bounds();
        let header = table_box.header_bounds();

        let mut group = svg_element::Group::new()
            .set("class", "table")
            .set("id", format!("table-{}", table.name()))
            .add(rectangle(bounds).set("fill", "white"))
            .add(
                rectangle(header)
                    .set("fill", self.header_color)
                    .set("fill-opacity", self.header_color.alpha()),
            )
            .add(
                self.text(header.center(), &table.name().to_name())
                    .set("text-anchor", "middle")
                    .set("font-weight", "bold")
                    .set("font-size", self.layout.font_size() * 1.15),
            );

        for (index, column) in table.columns().iter().enumerate() {
            let row = table_box.row_bounds(index);
            let position = Point::new(row.min_x() + self.layout.cell_padding(), row.center().y());

            let mut text = self.text(position, &column_label(column));
            if column.is_primary_key() {
                text = text.set("text-decoration", "underline");
            }
            if column.foreign_key().is_some() {
                text = text.set("font-style", "italic");
            }
            group = group.add(text);
        }

        group
    }

    fn render_edge(&self, edge: &EdgeRoute) -> svg_element::Group {
        let relationship = edge.relationship();
        let points = edge.points();

        let data = points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let command = if i == 0 { 'M' } else { 'L' };
                format!("{command} {} {}", point.x(), point.y())
            })
            .collect::<Vec<_>>()
            .join(" ");

        let path = svg_element::Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("stroke", self.edge_color)
            .set("stroke-opacity", self.edge_color.alpha())
            .set("stroke-width", 1.5);

        let child_label = self.edge_label(
            points[0],
            points[1],
            relationship.cardinality().label(),
        );
        let parent_label = self.edge_label(
            points[points.len() - 1],
            points[points.len() - 2],
            relationship.parent_cardinality().label(),
        );

        svg_element::Group::new()
            .set("class", "relationship")
            .set(
                "id",
                format!("{}-{}", relationship.table(), relationship.column()),
            )
            .add(path)
            .add(child_label)
            .add(parent_label)
    }

    /// Places `label` just off `end`, on the side facing `next`.
    fn edge_label(&self, end: Point, next: Point, label: &str) -> svg_element::Text {
        let towards_right = next.x() >= end.x();
        let x = if towards_right {
            end.x() + LABEL_OFFSET
        } else {
            end.x() - LABEL_OFFSET
        };
        let anchor = if towards_right { "start" } else { "end" };

        self.text(Point::new(x, end.y() - LABEL_OFFSET * 1.5), label)
            .set("text-anchor", anchor)
            .set("font-size", self.layout.font_size() * 0.8)
            .set("fill", self.edge_color)
    }
}

fn rectangle(bounds: Bounds) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("stroke", "black")
        .set("stroke-width", 1)
}

impl Exporter for Svg<'_> {
    fn export(&self, writer: &mut dyn Write) -> Result<(), Error> {
        let doc = self.render_document();
        info!("Writing SVG document");
        write!(writer, "{doc}")?;
        Ok(())
    }
}
