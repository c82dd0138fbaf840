//! Graphviz export.
//!
//! Builds a DOT graph with one node per table, labelled by an HTML-like
//! table, and one undirected edge per relationship from the foreign key row
//! of the child table to the referenced row of the parent. Cardinalities
//! become the tail (child) and head (parent) labels.
//!
//! [`Format::Dot`] writes the DOT source. Every other format runs the
//! Graphviz `dot` binary, which has to be on `PATH`.

use std::io::Write;

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Port, Stmt, Vertex,
};
use graphviz_rust::{
    cmd::{CommandArg, Format as GraphvizFormat},
    exec,
    printer::{DotPrinter, PrinterContext},
};
use log::{debug, error, info};

use erdraw_core::{
    color::Color,
    schema::{Column, Schema, Table},
};

use super::{Error, Exporter};
use crate::{
    Format,
    config::{Direction, StyleConfig},
};

/// Builder for [`Dot`].
pub struct DotBuilder<'a> {
    schema: &'a Schema,
    style: StyleConfig,
    direction: Direction,
    format: Format,
}

impl<'a> DotBuilder<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            style: StyleConfig::default(),
            direction: Direction::default(),
            format: Format::Dot,
        }
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the output format. Anything but [`Format::Dot`] is produced by
    /// Graphviz.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Resolves the style and returns the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed or
    /// Graphviz cannot produce the requested format.
    pub fn build(self) -> Result<Dot<'a>, Error> {
        let output = match self.format {
            Format::Dot => None,
            format => Some((format, graphviz_format(format)?)),
        };

        Ok(Dot {
            schema: self.schema,
            background_color: self.style.background_color().map_err(Error::Render)?,
            header_color: self.style.header_color().map_err(Error::Render)?,
            edge_color: self.style.edge_color().map_err(Error::Render)?,
            font: self.style.font().to_string(),
            direction: self.direction,
            output,
        })
    }
}

/// Graphviz exporter for a schema.
pub struct Dot<'a> {
    schema: &'a Schema,
    background_color: Option<Color>,
    header_color: Color,
    edge_color: Color,
    font: String,
    direction: Direction,
    /// Requested format and its Graphviz counterpart; `None` for DOT source.
    output: Option<(Format, GraphvizFormat)>,
}

impl Dot<'_> {
    /// Builds the DOT graph.
    pub fn graph(&self) -> Graph {
        let mut graph_attributes = vec![plain("rankdir", self.direction.rankdir())];
        if let Some(color) = self.background_color {
            graph_attributes.push(quoted("bgcolor", &color.to_hex()));
        }

        let mut stmts = vec![
            Stmt::GAttribute(GraphAttributes::Graph(graph_attributes)),
            Stmt::GAttribute(GraphAttributes::Node(vec![
                plain("shape", "plaintext"),
                quoted("fontname", &self.font),
            ])),
            Stmt::GAttribute(GraphAttributes::Edge(vec![
                quoted("color", &self.edge_color.to_hex()),
                quoted("fontcolor", &self.edge_color.to_hex()),
                quoted("fontname", &self.font),
                plain("labeldistance", "2"),
            ])),
        ];

        for table in self.schema.tables() {
            stmts.push(Stmt::Node(Node::new(
                NodeId(escaped(&table.name().to_name()), None),
                vec![Attribute(
                    Id::Plain("label".to_string()),
                    Id::Html(format!("<{}>", self.table_label(table))),
                )],
            )));
        }

        for relationship in self.schema.relationships() {
            let child = column_vertex(
                &relationship.table().to_name(),
                &relationship.column().to_name(),
            );
            let parent = column_vertex(
                &relationship.parent_table().to_name(),
                &relationship.parent_column().to_name(),
            );
            stmts.push(Stmt::Edge(Edge {
                ty: EdgeTy::Pair(child, parent),
                attributes: vec![
                    quoted("taillabel", relationship.cardinality().label()),
                    quoted("headlabel", relationship.parent_cardinality().label()),
                ],
            }));
        }

        Graph::Graph {
            id: Id::Plain("erd".to_string()),
            strict: false,
            stmts,
        }
    }

    /// Returns the DOT source of [`Dot::graph`].
    pub fn to_dot_string(&self) -> String {
        self.graph().print(&mut PrinterContext::default())
    }

    fn table_label(&self, table: &Table) -> String {
        let mut html = format!(
            "<FONT FACE=\"{font}\"><TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLPADDING=\"4\" CELLSPACING=\"0\">\
             <TR><TD BGCOLOR=\"{header}\"><B><FONT POINT-SIZE=\"16\">{name}</FONT></B></TD></TR>",
            font = escape_html(&self.font),
            header = self.header_color.to_hex(),
            name = escape_html(&table.name().to_name()),
        );
        for column in table.columns() {
            html.push_str(&format!(
                "<TR><TD ALIGN=\"LEFT\" PORT=\"{port}\">{cell}</TD></TR>",
                port = escape_html(&column.name().to_name()),
                cell = column_cell(column),
            ));
        }
        html.push_str("</TABLE></FONT>");
        html
    }
}

/// Column name marked up by role, followed by its type.
fn column_cell(column: &Column) -> String {
    let mut name = escape_html(&column.name().to_name());
    if column.is_primary_key() {
        name = format!("<U>{name}</U>");
    }
    if column.foreign_key().is_some() {
        name = format!("<I>{name}</I>");
    }
    format!(
        "{name} <FONT COLOR=\"#7f7f7f\">[{}]</FONT>",
        escape_html(&column.column_type().to_string())
    )
}

fn graphviz_format(format: Format) -> Result<GraphvizFormat, Error> {
    match format {
        Format::Png => Ok(GraphvizFormat::Png),
        Format::Jpg => Ok(GraphvizFormat::Jpg),
        Format::Svg => Ok(GraphvizFormat::Svg),
        Format::Pdf => Ok(GraphvizFormat::Pdf),
        Format::Dot | Format::Markdown => Err(Error::Render(format!(
            "Graphviz cannot produce `{format}` output"
        ))),
    }
}

fn column_vertex(table: &str, column: &str) -> Vertex {
    Vertex::N(NodeId(escaped(table), Some(Port(Some(escaped(column)), None))))
}

fn escaped(value: &str) -> Id {
    Id::Escaped(format!("\"{}\"", value.replace('"', "\\\"")))
}

fn plain(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), Id::Plain(value.to_string()))
}

fn quoted(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), escaped(value))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Exporter for Dot<'_> {
    fn export(&self, writer: &mut dyn Write) -> Result<(), Error> {
        let Some((format, graphviz)) = self.output else {
            info!("Writing DOT source");
            writer.write_all(self.to_dot_string().as_bytes())?;
            return Ok(());
        };

        info!(format:% = format; "Running Graphviz");
        let bytes = exec(
            self.graph(),
            &mut PrinterContext::default(),
            vec![CommandArg::Format(graphviz)],
        )
        .map_err(|err| {
            error!(err:err; "Graphviz failed");
            Error::Render(format!("failed to run Graphviz `dot`: {err}"))
        })?;
        debug!(bytes = bytes.len(); "Graphviz finished");

        writer.write_all(&bytes)?;
        Ok(())
    }
}
