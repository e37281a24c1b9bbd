//! End-to-end planning run.
//!
//! Build graph, route every order both ways, synthesize training data from
//! the dynamic route lengths, fit the completion-time model once, then
//! recommend a picker per order. Sequential; the first failing order fails
//! the whole run.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::assignment::assign_best_picker;
use crate::error::Result;
use crate::forest::{ForestOptions, RandomForestRegressor};
use crate::graph::{LayoutGraph, build_graph};
use crate::metrics::{pct_improvement, route_cost};
use crate::model::CompletionTimeModel;
use crate::models::{Order, Picker, orders_from_table, pickers_from_table};
use crate::route::Route;
use crate::routing::{dynamic_route, static_route};
use crate::simulation::{OrderSample, SynthesisOptions, build_training_data};
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Node every route starts from.
    pub start_node: String,
    /// Node every route finishes at, if any.
    pub end_node: Option<String>,
    /// Zone assumed for orders that do not state one.
    pub default_zone: String,
    /// Seed for training-data synthesis.
    pub seed: u64,
    pub synthesis: SynthesisOptions,
    pub forest: ForestOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            start_node: "START".to_string(),
            end_node: Some("PACK".to_string()),
            default_zone: "A".to_string(),
            seed: 42,
            synthesis: SynthesisOptions::default(),
            forest: ForestOptions::default(),
        }
    }
}

/// Static vs dynamic routing outcome for one order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingResult {
    pub order_id: String,
    pub order_zone: String,
    pub static_cost: f64,
    pub dynamic_cost: f64,
    pub improvement_pct: f64,
    pub static_route: Route,
    pub dynamic_route: Route,
}

/// Recommended picker for one order, with every picker's prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerRecommendation {
    pub order_id: String,
    pub best_picker: String,
    pub predicted_times: Vec<(String, f64)>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub graph: LayoutGraph,
    pub orders: Vec<Order>,
    pub pickers: Vec<Picker>,
    pub routing_results: Vec<RoutingResult>,
    pub picker_recommendations: Vec<PickerRecommendation>,
    pub training_rows: usize,
}

/// Routes one order with both strategies.
pub fn route_order(
    graph: &LayoutGraph,
    order: &Order,
    options: &PipelineOptions,
) -> Result<RoutingResult> {
    let end = options.end_node.as_deref();
    let static_route = static_route(graph, &options.start_node, &order.locations, end)?;
    let dynamic_route = dynamic_route(graph, &options.start_node, &order.locations, end)?;

    let static_cost = route_cost(graph, &static_route)?;
    let dynamic_cost = route_cost(graph, &dynamic_route)?;

    if order.order_zone.is_none() {
        warn!(
            order_id = %order.order_id,
            zone = %options.default_zone,
            "order has no zone, using default"
        );
    }
    debug!(order_id = %order.order_id, static_cost, dynamic_cost, "routed order");

    Ok(RoutingResult {
        order_id: order.order_id.clone(),
        order_zone: order.zone_or(&options.default_zone).to_string(),
        static_cost,
        dynamic_cost,
        improvement_pct: pct_improvement(static_cost, dynamic_cost),
        static_route,
        dynamic_route,
    })
}

/// Runs routing, model training and picker assignment on parsed inputs.
pub fn plan(
    graph: LayoutGraph,
    orders: Vec<Order>,
    pickers: Vec<Picker>,
    options: &PipelineOptions,
) -> Result<PipelineOutput> {
    info!(orders = orders.len(), "routing orders");
    let routing_results = orders
        .iter()
        .map(|order| route_order(&graph, order, options))
        .collect::<Result<Vec<_>>>()?;

    let samples: Vec<OrderSample> = routing_results
        .iter()
        .map(|result| {
            OrderSample::new(result.order_id.clone())
                .with_distance(result.dynamic_cost)
                .with_zone(result.order_zone.clone())
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(options.seed);
    let records = build_training_data(&samples, &pickers, &options.synthesis, &mut rng)?;
    info!(rows = records.len(), "training completion-time model");
    let forest = RandomForestRegressor::new(options.forest.clone());
    let model = CompletionTimeModel::fit_records(forest, &records)?;

    info!(pickers = pickers.len(), "recommending pickers");
    let picker_recommendations = routing_results
        .iter()
        .map(|result| -> Result<PickerRecommendation> {
            let assignment =
                assign_best_picker(&model, result.dynamic_cost, &result.order_zone, &pickers)?;
            Ok(PickerRecommendation {
                order_id: result.order_id.clone(),
                best_picker: assignment.best_picker,
                predicted_times: assignment.predictions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PipelineOutput {
        graph,
        orders,
        pickers,
        routing_results,
        picker_recommendations,
        training_rows: records.len(),
    })
}

/// Runs the whole pipeline on the three input tables.
pub fn run_end_to_end(
    layout: &Table,
    orders: &Table,
    pickers: &Table,
    options: &PipelineOptions,
) -> Result<PipelineOutput> {
    info!("building layout graph");
    let graph = build_graph(layout)?;
    let orders = orders_from_table(orders)?;
    let pickers = pickers_from_table(pickers)?;
    plan(graph, orders, pickers, options)
}
