//! Graph structure of a schema.
//!
//! [`SchemaGraph`] places every table on a [`petgraph`] directed graph with
//! one edge per relationship, pointing from the parent table to the child
//! table that holds the foreign key. Layout engines read tables, edges and
//! ranks from here instead of walking the schema themselves.

use std::collections::HashMap;

use log::{debug, trace, warn};
use petgraph::{
    algo::is_cyclic_directed,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use erdraw_core::{
    identifier::Id,
    schema::{Relationship, Schema, Table},
};

use crate::ErdrawError;

/// Tables connected by their relationships.
#[derive(Debug)]
pub struct SchemaGraph<'a> {
    graph: DiGraph<&'a Table, &'a Relationship>,
}

impl<'a> SchemaGraph<'a> {
    /// Builds the graph for `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`ErdrawError::Graph`] if a relationship names a table the
    /// schema does not contain.
    pub fn from_schema(schema: &'a Schema) -> Result<Self, ErdrawError> {
        let mut graph = DiGraph::with_capacity(schema.len(), schema.relationships().len());
        let mut indices = HashMap::with_capacity(schema.len());

        for table in schema.tables() {
            let idx = graph.add_node(table);
            indices.insert(table.name(), idx);
        }

        for relationship in schema.relationships() {
            let parent = Self::index_in(&indices, relationship.parent_table())?;
            let child = Self::index_in(&indices, relationship.table())?;
            graph.add_edge(parent, child, relationship);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Schema graph built"
        );

        Ok(Self { graph })
    }

    fn index_in(indices: &HashMap<Id, NodeIndex>, table: Id) -> Result<NodeIndex, ErdrawError> {
        indices.get(&table).copied().ok_or_else(|| {
            ErdrawError::Graph(format!("relationship refers to unknown table `{table}`"))
        })
    }

    /// Returns the tables in declaration order.
    pub fn tables(&self) -> impl Iterator<Item = &'a Table> + '_ {
        self.graph.node_indices().map(|idx| self.graph[idx])
    }

    /// Returns every relationship as `(parent, child, relationship)`.
    pub fn relationships(&self) -> impl Iterator<Item = (&'a Table, &'a Table, &'a Relationship)> + '_ {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()],
                self.graph[edge.target()],
                *edge.weight(),
            )
        })
    }

    pub fn tables_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if following relationships from parent to child can
    /// lead back to the starting table.
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Assigns every table to a rank so that parents come before their
    /// children.
    ///
    /// A table's rank is one more than the highest rank among its parents.
    /// Self references are ignored. With cycles, ranking stops after as many
    /// rounds as there are tables, which leaves every table placed.
    ///
    /// Tables inside each rank keep declaration order.
    pub fn ranks(&self) -> Vec<Vec<&'a Table>> {
        let count = self.graph.node_count();
        if count == 0 {
            return Vec::new();
        }

        if self.has_cycle() {
            warn!("Relationships form a cycle, ranks are approximate");
        }

        let mut rank = vec![0usize; count];
        for _ in 0..count {
            let mut changed = false;
            for edge in self.graph.edge_references() {
                let (parent, child) = (edge.source().index(), edge.target().index());
                if parent != child && rank[child] < rank[parent] + 1 {
                    rank[child] = rank[parent] + 1;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        // Cycles can push ranks past the table count; squash them back.
        for r in rank.iter_mut() {
            *r = (*r).min(count - 1);
        }

        let depth = rank.iter().copied().max().unwrap_or_default() + 1;
        let mut ranks: Vec<Vec<&'a Table>> = vec![Vec::new(); depth];
        for idx in self.graph.node_indices() {
            ranks[rank[idx.index()]].push(self.graph[idx]);
        }
        ranks.retain(|tables| !tables.is_empty());

        trace!(ranks:? = ranks.iter().map(Vec::len).collect::<Vec<_>>(); "Tables ranked");
        ranks
    }
}

#[cfg(test)]
mod tests {
    use erdraw_core::schema::{Column, ColumnType, ForeignKey};

    use super::*;

    fn keyed(name: &str) -> Table {
        Table::new(name).with_column(Column::new("id", ColumnType::Integer).primary_key())
    }

    fn child_of(name: &str, parents: &[&str]) -> Table {
        parents.iter().fold(keyed(name), |table, parent| {
            table.with_column(
                Column::new(&format!("{parent}_id"), ColumnType::Integer)
                    .not_null()
                    .references(ForeignKey::new(parent, "id")),
            )
        })
    }

    fn rank_names(graph: &SchemaGraph) -> Vec<Vec<String>> {
        graph
            .ranks()
            .iter()
            .map(|rank| rank.iter().map(|t| t.name().to_name()).collect())
            .collect()
    }

    #[test]
    fn test_parents_rank_before_children() {
        let schema = Schema::builder()
            .with_table(keyed("user"))
            .with_table(child_of("post", &["user"]))
            .with_table(child_of("comment", &["user", "post"]))
            .build();
        let graph = SchemaGraph::from_schema(&schema).unwrap();

        assert_eq!(
            rank_names(&graph),
            vec![vec!["user"], vec!["post"], vec!["comment"]]
        );
        let user_children = graph
            .relationships()
            .filter(|(parent, _, _)| parent.name() == "user")
            .count();
        assert_eq!(user_children, 2);
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_unrelated_tables_share_first_rank() {
        let schema = Schema::builder()
            .with_table(keyed("a"))
            .with_table(keyed("b"))
            .build();
        let graph = SchemaGraph::from_schema(&schema).unwrap();

        assert_eq!(rank_names(&graph), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_self_reference_stays_in_place() {
        let schema = Schema::builder()
            .with_table(child_of("node", &["node"]))
            .build();
        let graph = SchemaGraph::from_schema(&schema).unwrap();

        assert_eq!(rank_names(&graph), vec![vec!["node"]]);
        assert_eq!(graph.relationships().count(), 1);
    }

    #[test]
    fn test_cycle_places_every_table() {
        let schema = Schema::builder()
            .with_table(child_of("a", &["b"]))
            .with_table(child_of("b", &["a"]))
            .build();
        let graph = SchemaGraph::from_schema(&schema).unwrap();

        assert!(graph.has_cycle());
        let placed: usize = graph.ranks().iter().map(Vec::len).sum();
        assert_eq!(placed, 2);
    }

    #[test]
    fn test_unknown_table_is_an_error() {
        let schema = Schema::builder()
            .with_table(child_of("post", &["ghost"]))
            .build();

        let err = SchemaGraph::from_schema(&schema).unwrap_err();
        assert!(matches!(err, ErdrawError::Graph(_)));
    }
}
