//! Native layered layout for entity-relationship diagrams.
//!
//! Tables are placed rank by rank as computed by
//! [`SchemaGraph::ranks`]: with [`Direction::LeftRight`] every rank is a
//! column and parents sit left of their children, with
//! [`Direction::TopBottom`] every rank is a row and parents sit above.
//! Relationship edges are polylines from the foreign key row of the child
//! table to the referenced row of the parent table.
//!
//! Text is measured with a fixed average character width, which keeps the
//! layout independent of the fonts installed on the machine.

use std::collections::HashMap;

use log::{debug, info};

use erdraw_core::{
    geometry::{Bounds, Insets, Point, Size},
    identifier::Id,
    schema::{Column, Relationship, Table},
};

use crate::{ErdrawError, config::Direction, structure::SchemaGraph};

/// Average glyph width as a fraction of the font size.
const CHAR_WIDTH_RATIO: f32 = 0.6;

/// How far a self-referencing edge loops out of its table.
const SELF_LOOP_OFFSET: f32 = 24.0;

/// Returns the text shown in a column row, `name [TYPE]`.
pub fn column_label(column: &Column) -> String {
    format!("{} [{}]", column.name(), column.column_type())
}

/// Estimates the rendered width of `text` at `font_size`.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO
}

/// A table together with its position in the diagram.
#[derive(Debug, Clone)]
pub struct TableBox<'a> {
    table: &'a Table,
    bounds: Bounds,
    header_height: f32,
    row_height: f32,
}

impl<'a> TableBox<'a> {
    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The header band holding the table name.
    pub fn header_bounds(&self) -> Bounds {
        Point::new(self.bounds.min_x(), self.bounds.min_y())
            .to_bounds(Size::new(self.bounds.width(), self.header_height))
    }

    /// The band of the `index`-th column row.
    pub fn row_bounds(&self, index: usize) -> Bounds {
        let top = self.bounds.min_y() + self.header_height + index as f32 * self.row_height;
        Point::new(self.bounds.min_x(), top).to_bounds(Size::new(self.bounds.width(), self.row_height))
    }

    /// The band of the row showing `column`, or the header when the column
    /// is not part of the table.
    fn column_bounds(&self, column: Id) -> Bounds {
        self.table
            .columns()
            .iter()
            .position(|c| c.name() == column)
            .map(|index| self.row_bounds(index))
            .unwrap_or_else(|| self.header_bounds())
    }
}

/// A relationship edge routed between two tables.
#[derive(Debug, Clone)]
pub struct EdgeRoute<'a> {
    relationship: &'a Relationship,
    points: Vec<Point>,
}

impl<'a> EdgeRoute<'a> {
    pub fn relationship(&self) -> &'a Relationship {
        self.relationship
    }

    /// Polyline points, from the child end to the parent end.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The point where the edge leaves the child table.
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// The point where the edge enters the parent table.
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}

/// The positioned diagram.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    tables: Vec<TableBox<'a>>,
    edges: Vec<EdgeRoute<'a>>,
    bounds: Bounds,
    font_size: f32,
    cell_padding: f32,
}

impl<'a> Layout<'a> {
    /// Tables in declaration order.
    pub fn tables(&self) -> &[TableBox<'a>] {
        &self.tables
    }

    pub fn edges(&self) -> &[EdgeRoute<'a>] {
        &self.edges
    }

    /// Bounds of all content, padding included.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Horizontal space between a table border and its text.
    pub fn cell_padding(&self) -> f32 {
        self.cell_padding
    }

    pub fn table(&self, name: impl Into<Id>) -> Option<&TableBox<'a>> {
        let name = name.into();
        self.tables.iter().find(|tb| tb.table.name() == name)
    }
}

/// Places tables and routes edges.
///
/// # Examples
///
/// ```
/// use erdraw::{config::Direction, layout::LayoutEngine, structure::SchemaGraph};
///
/// let schema = erdraw_model::declare();
/// let graph = SchemaGraph::from_schema(&schema).unwrap();
/// let layout = LayoutEngine::new(Direction::LeftRight)
///     .with_rank_spacing(80.0)
///     .calculate(&graph)
///     .unwrap();
///
/// assert_eq!(layout.tables().len(), 5);
/// assert_eq!(layout.edges().len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    direction: Direction,
    padding: Insets,
    cell_padding: f32,
    rank_spacing: f32,
    table_spacing: f32,
    font_size: f32,
}

impl LayoutEngine {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            padding: Insets::uniform(20.0),
            cell_padding: 8.0,
            rank_spacing: 100.0,
            table_spacing: 40.0,
            font_size: 14.0,
        }
    }

    /// Sets the gap between consecutive ranks.
    pub fn with_rank_spacing(mut self, spacing: f32) -> Self {
        self.rank_spacing = spacing;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    fn header_height(&self) -> f32 {
        self.font_size * 2.2
    }

    fn row_height(&self) -> f32 {
        self.font_size * 1.8
    }

    /// Measures a table without placing it.
    fn table_size(&self, table: &Table) -> Size {
        let header_width = text_width(&table.name().to_name(), self.font_size * 1.15);
        let widest_row = table
            .columns()
            .iter()
            .map(|column| text_width(&column_label(column), self.font_size))
            .fold(header_width, f32::max);

        Size::new(
            widest_row + self.cell_padding * 2.0,
            self.header_height() + table.columns().len() as f32 * self.row_height(),
        )
    }

    /// Computes the layout of `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`ErdrawError::Layout`] if the graph has no tables or the
    /// configured metrics are not positive.
    pub fn calculate<'a>(&self, graph: &SchemaGraph<'a>) -> Result<Layout<'a>, ErdrawError> {
        if graph.tables_count() == 0 {
            return Err(ErdrawError::Layout(
                "schema has no tables to lay out".to_string(),
            ));
        }
        if self.font_size.is_nan()
            || self.font_size <= 0.0
            || self.rank_spacing < 0.0
            || self.table_spacing < 0.0
        {
            return Err(ErdrawError::Layout(format!(
                "invalid metrics: font size {}, rank spacing {}, table spacing {}",
                self.font_size, self.rank_spacing, self.table_spacing
            )));
        }

        info!(direction:? = self.direction; "Calculating layout");

        let ranks = graph.ranks();
        let sizes: Vec<Vec<Size>> = ranks
            .iter()
            .map(|rank| rank.iter().map(|table| self.table_size(table)).collect())
            .collect();

        // Extent of every rank across the flow and along it.
        let (rank_depths, rank_lengths): (Vec<f32>, Vec<f32>) = sizes
            .iter()
            .map(|rank| {
                let depth = rank
                    .iter()
                    .map(|size| self.across(*size))
                    .fold(0.0, f32::max);
                let length = rank.iter().map(|size| self.along(*size)).sum::<f32>()
                    + self.table_spacing * rank.len().saturating_sub(1) as f32;
                (depth, length)
            })
            .unzip();
        let longest = rank_lengths.iter().copied().fold(0.0, f32::max);

        let mut placed: HashMap<Id, Bounds> = HashMap::with_capacity(graph.tables_count());
        let (along_start, across_start) = match self.direction {
            Direction::LeftRight => (self.padding.top(), self.padding.left()),
            Direction::TopBottom => (self.padding.left(), self.padding.top()),
        };
        let mut rank_offset = across_start;
        for (i, rank) in ranks.iter().enumerate() {
            let mut cursor = along_start + (longest - rank_lengths[i]) / 2.0;
            for (table, size) in rank.iter().zip(&sizes[i]) {
                let top_left = match self.direction {
                    Direction::LeftRight => Point::new(rank_offset, cursor),
                    Direction::TopBottom => Point::new(cursor, rank_offset),
                };
                placed.insert(table.name(), top_left.to_bounds(*size));
                cursor += self.along(*size) + self.table_spacing;
            }
            rank_offset += rank_depths[i] + self.rank_spacing;
        }

        let tables: Vec<TableBox<'a>> = graph
            .tables()
            .filter_map(|table| {
                placed.get(&table.name()).map(|&bounds| TableBox {
                    table,
                    bounds,
                    header_height: self.header_height(),
                    row_height: self.row_height(),
                })
            })
            .collect();

        let boxes: HashMap<Id, &TableBox<'a>> =
            tables.iter().map(|tb| (tb.table.name(), tb)).collect();
        let mut edges = Vec::new();
        for (parent, child, relationship) in graph.relationships() {
            let (Some(parent_box), Some(child_box)) =
                (boxes.get(&parent.name()), boxes.get(&child.name()))
            else {
                return Err(ErdrawError::Layout(format!(
                    "relationship `{relationship}` connects a table that was not placed"
                )));
            };
            edges.push(EdgeRoute {
                relationship,
                points: self.route(relationship, child_box, parent_box),
            });
        }

        let content = tables
            .iter()
            .map(TableBox::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default();
        let bounds = Point::new(0.0, 0.0)
            .to_bounds(Size::default())
            .merge(&content.add_padding(self.padding));

        debug!(
            tables = tables.len(),
            edges = edges.len(),
            width = bounds.width(),
            height = bounds.height();
            "Layout calculated"
        );

        Ok(Layout {
            tables,
            edges,
            bounds,
            font_size: self.font_size,
            cell_padding: self.cell_padding,
        })
    }

    /// Size along the direction in which tables of one rank are stacked.
    fn along(&self, size: Size) -> f32 {
        match self.direction {
            Direction::LeftRight => size.height(),
            Direction::TopBottom => size.width(),
        }
    }

    /// Size across the flow, from one rank to the next.
    fn across(&self, size: Size) -> f32 {
        match self.direction {
            Direction::LeftRight => size.width(),
            Direction::TopBottom => size.height(),
        }
    }

    fn route(&self, relationship: &Relationship, child: &TableBox, parent: &TableBox) -> Vec<Point> {
        let from = child.column_bounds(relationship.column());
        let to = parent.column_bounds(relationship.parent_column());

        if relationship.is_self_referencing() {
            let x = child.bounds.max_x();
            let (from_y, to_y) = (from.center().y(), to.center().y());
            return vec![
                Point::new(x, from_y),
                Point::new(x + SELF_LOOP_OFFSET, from_y),
                Point::new(x + SELF_LOOP_OFFSET, to_y),
                Point::new(x, to_y),
            ];
        }

        match self.direction {
            Direction::LeftRight => {
                let (from_x, to_x) = if child.bounds.center().x() >= parent.bounds.center().x() {
                    (from.min_x(), to.max_x())
                } else {
                    (from.max_x(), to.min_x())
                };
                let start = Point::new(from_x, from.center().y());
                let end = Point::new(to_x, to.center().y());
                let mid_x = start.midpoint(end).x();
                vec![
                    start,
                    Point::new(mid_x, start.y()),
                    Point::new(mid_x, end.y()),
                    end,
                ]
            }
            Direction::TopBottom => {
                let (from_y, to_y) = if child.bounds.center().y() >= parent.bounds.center().y() {
                    (child.bounds.min_y(), parent.bounds.max_y())
                } else {
                    (child.bounds.max_y(), parent.bounds.min_y())
                };
                let start = Point::new(child.bounds.center().x(), from_y);
                let end = Point::new(parent.bounds.center().x(), to_y);
                let mid_y = start.midpoint(end).y();
                vec![
                    start,
                    Point::new(start.x(), mid_y),
                    Point::new(end.x(), mid_y),
                    end,
                ]
            }
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(Direction::default())
    }
}
