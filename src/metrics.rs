//! Route cost and improvement metrics.

use crate::error::{PlannerError, Result};
use crate::graph::LayoutGraph;
use crate::route::Route;

/// Sum of edge weights along consecutive route nodes.
///
/// Routes shorter than two nodes cost 0. Consecutive nodes that are not
/// adjacent in the graph raise `UnknownEdge`.
pub fn route_cost(graph: &LayoutGraph, route: &Route) -> Result<f64> {
    route.nodes().windows(2).try_fold(0.0, |total, pair| {
        let weight = graph
            .edge_weight(&pair[0], &pair[1])
            .ok_or_else(|| PlannerError::UnknownEdge {
                from: pair[0].clone(),
                to: pair[1].clone(),
            })?;
        Ok(total + weight)
    })
}

/// Relative improvement of `improved` over `baseline`, in percent.
///
/// Non-positive baselines yield 0.
pub fn pct_improvement(baseline: f64, improved: f64) -> f64 {
    if baseline <= 0.0 {
        return 0.0;
    }
    (baseline - improved) / baseline * 100.0
}
