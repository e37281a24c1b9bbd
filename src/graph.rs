//! Warehouse layout graph.
//!
//! Undirected, weighted adjacency list keyed by location identifier.
//! Built once per run from the layout table and read-only afterwards.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::table::Table;

/// Layout graph: nodes are location identifiers, edges carry a
/// non-negative walking distance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl LayoutGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an undirected edge. An existing edge between the same two
    /// nodes keeps its position but takes the new weight.
    pub fn add_edge(&mut self, from: &str, to: &str, distance: f64) {
        let a = self.intern(from);
        let b = self.intern(to);
        Self::upsert(&mut self.adjacency[a], b, distance);
        if a != b {
            Self::upsert(&mut self.adjacency[b], a, distance);
        }
    }

    fn upsert(list: &mut Vec<(usize, f64)>, target: usize, distance: f64) {
        match list.iter_mut().find(|(n, _)| *n == target) {
            Some(entry) => entry.1 = distance,
            None => list.push((target, distance)),
        }
    }

    fn intern(&mut self, node: &str) -> usize {
        if let Some(&idx) = self.index.get(node) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(node.to_string());
        self.index.insert(node.to_string(), idx);
        self.adjacency.push(Vec::new());
        idx
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.index.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .enumerate()
            .map(|(a, list)| list.iter().filter(|(b, _)| *b >= a).count())
            .sum()
    }

    /// Node identifiers in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Weight of the edge between two nodes, if they are adjacent.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let a = *self.index.get(from)?;
        let b = *self.index.get(to)?;
        self.adjacency[a].iter().find(|(n, _)| *n == b).map(|(_, w)| *w)
    }

    /// Neighbours of a node with edge weights, in insertion order.
    pub fn neighbors<'a>(
        &'a self,
        node: &str,
    ) -> Option<impl Iterator<Item = (&'a str, f64)> + 'a> {
        let idx = *self.index.get(node)?;
        Some(
            self.adjacency[idx]
                .iter()
                .map(move |(n, w)| (self.nodes[*n].as_str(), *w)),
        )
    }

    /// Snapshot of all edges as `(lower, upper, weight)` with endpoints
    /// ordered lexicographically, sorted.
    pub fn edges(&self) -> Vec<(String, String, f64)> {
        let mut edges: Vec<(String, String, f64)> = self
            .adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, list)| {
                list.iter()
                    .filter(move |(b, _)| *b >= a)
                    .map(move |(b, w)| (a, *b, *w))
            })
            .map(|(a, b, w)| {
                let (x, y) = (&self.nodes[a], &self.nodes[b]);
                if x <= y {
                    (x.clone(), y.clone(), w)
                } else {
                    (y.clone(), x.clone(), w)
                }
            })
            .collect();
        edges.sort_by(|l, r| l.0.cmp(&r.0).then_with(|| l.1.cmp(&r.1)));
        edges
    }

    pub(crate) fn index_of(&self, node: &str) -> Result<usize> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| PlannerError::UnknownNode(node.to_string()))
    }

    pub(crate) fn name(&self, idx: usize) -> &str {
        &self.nodes[idx]
    }

    pub(crate) fn adjacent(&self, idx: usize) -> &[(usize, f64)] {
        &self.adjacency[idx]
    }
}

/// Builds the layout graph from a table with `from`, `to` and `distance`
/// columns. Duplicate edges: last row wins.
pub fn build_graph(table: &Table) -> Result<LayoutGraph> {
    let cols = table.require(&["from", "to", "distance"])?;
    let mut graph = LayoutGraph::new();

    for row in 0..table.len() {
        let from = table.cell(row, cols[0]);
        let to = table.cell(row, cols[1]);
        let distance = table.cell_f64(row, cols[2])?;
        if distance < 0.0 {
            return Err(PlannerError::invalid_value(
                &table.name,
                "distance",
                row,
                table.cell(row, cols[2]),
            ));
        }
        graph.add_edge(from, to, distance);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built layout graph"
    );
    Ok(graph)
}
