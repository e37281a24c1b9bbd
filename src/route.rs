//! Route representation as a walked sequence of layout nodes.

use serde::{Deserialize, Serialize};

/// A route through the warehouse as an ordered list of node identifiers.
///
/// Consecutive nodes are adjacent in the layout graph when the route was
/// produced by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Route {
    nodes: Vec<String>,
}

impl Route {
    /// Creates a route from an explicit node sequence.
    pub fn new(nodes: Vec<String>) -> Self {
        Self { nodes }
    }

    /// Returns the node sequence.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Consumes the route and returns the owned node sequence.
    pub fn into_nodes(self) -> Vec<String> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Last node walked so far.
    pub fn last(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// Appends a path segment. On a non-empty route the segment's first
    /// node is the current last node and is skipped.
    pub fn extend_with(&mut self, segment: Vec<String>) {
        let skip = usize::from(!self.nodes.is_empty());
        self.nodes.extend(segment.into_iter().skip(skip));
    }

    /// Position of the first visit to `node`, if any.
    pub fn position(&self, node: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == node)
    }
}
