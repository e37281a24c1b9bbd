//! Pick route planning over the layout graph.
//!
//! # Algorithms
//!
//! - `shortest_path`: binary-heap Dijkstra. Weights are non-negative by
//!   construction of [`LayoutGraph`]. Among equal-cost paths the first
//!   one found is kept.
//! - `static_route`: visits stops in the given order (baseline).
//! - `dynamic_route`: greedy nearest-next. From the current node, walk to
//!   the closest unvisited stop, repeat. O(n²) shortest-path work in the
//!   number of stops; approximate, not an exact TSP.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::graph::LayoutGraph;
use crate::route::Route;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    cost: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Reversed so the max-heap pops the cheapest, earliest-pushed entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single-source shortest path tree.
struct ShortestPaths {
    source: usize,
    dist: Vec<f64>,
    prev: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Runs Dijkstra from `source`. Stops early once `target` is settled.
    fn compute(graph: &LayoutGraph, source: usize, target: Option<usize>) -> Self {
        let n = graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev = vec![None; n];
        let mut settled = vec![false; n];
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        dist[source] = 0.0;
        heap.push(HeapEntry { cost: 0.0, seq, node: source });

        while let Some(HeapEntry { cost, node, .. }) = heap.pop() {
            if settled[node] {
                continue;
            }
            settled[node] = true;
            if Some(node) == target {
                break;
            }

            for &(next, weight) in graph.adjacent(node) {
                let candidate = cost + weight;
                if candidate < dist[next] {
                    dist[next] = candidate;
                    prev[next] = Some(node);
                    seq += 1;
                    heap.push(HeapEntry { cost: candidate, seq, node: next });
                }
            }
        }

        Self { source, dist, prev }
    }

    fn cost_to(&self, target: usize) -> Option<f64> {
        let cost = self.dist[target];
        cost.is_finite().then_some(cost)
    }

    fn path_to(&self, graph: &LayoutGraph, target: usize) -> Vec<String> {
        let mut path = vec![graph.name(target).to_string()];
        let mut current = target;
        while current != self.source {
            match self.prev[current] {
                Some(p) => {
                    path.push(graph.name(p).to_string());
                    current = p;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

fn no_path(from: &str, to: &str) -> PlannerError {
    PlannerError::NoPath {
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Shortest weighted path between two nodes: `(nodes, cost)`.
///
/// The node list includes both endpoints; `src == dst` yields `[src]` at
/// cost 0.
pub fn shortest_path(graph: &LayoutGraph, src: &str, dst: &str) -> Result<(Vec<String>, f64)> {
    let from = graph.index_of(src)?;
    let to = graph.index_of(dst)?;

    let tree = ShortestPaths::compute(graph, from, Some(to));
    let cost = tree.cost_to(to).ok_or_else(|| no_path(src, dst))?;
    Ok((tree.path_to(graph, to), cost))
}

/// Cost of the shortest path between two nodes.
pub fn shortest_path_cost(graph: &LayoutGraph, src: &str, dst: &str) -> Result<f64> {
    shortest_path(graph, src, dst).map(|(_, cost)| cost)
}

/// Baseline route: `start -> stops[0] -> stops[1] -> ... -> end`, stops
/// never reordered.
pub fn static_route<S: AsRef<str>>(
    graph: &LayoutGraph,
    start: &str,
    stops: &[S],
    end: Option<&str>,
) -> Result<Route> {
    graph.index_of(start)?;

    let mut route = Route::new(vec![start.to_string()]);
    let mut current = start.to_string();

    for stop in stops.iter().map(|s| s.as_ref()).chain(end) {
        let (segment, _) = shortest_path(graph, &current, stop)?;
        route.extend_with(segment);
        current = stop.to_string();
    }

    debug!(start, stops = stops.len(), nodes = route.len(), "static route");
    Ok(route)
}

/// Greedy nearest-next route from `start` through every stop, then to
/// `end` if given.
///
/// At each step the unvisited stop with the smallest shortest-path cost
/// from the current node is chosen. Ties go to the stop listed first.
pub fn dynamic_route<S: AsRef<str>>(
    graph: &LayoutGraph,
    start: &str,
    stops: &[S],
    end: Option<&str>,
) -> Result<Route> {
    let mut current = graph.index_of(start)?;
    let mut remaining = stops
        .iter()
        .map(|s| graph.index_of(s.as_ref()))
        .collect::<Result<Vec<usize>>>()?;

    let mut route = Route::new(vec![start.to_string()]);

    while !remaining.is_empty() {
        let tree = ShortestPaths::compute(graph, current, None);

        let mut best: Option<(usize, f64)> = None;
        for (slot, &stop) in remaining.iter().enumerate() {
            let cost = tree
                .cost_to(stop)
                .ok_or_else(|| no_path(graph.name(current), graph.name(stop)))?;
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((slot, cost));
            }
        }

        if let Some((slot, _)) = best {
            let next = remaining.remove(slot);
            route.extend_with(tree.path_to(graph, next));
            current = next;
        }
    }

    if let Some(end) = end {
        let (segment, _) = shortest_path(graph, graph.name(current), end)?;
        route.extend_with(segment);
    }

    debug!(start, stops = stops.len(), nodes = route.len(), "dynamic route");
    Ok(route)
}
