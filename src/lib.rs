//! pick-planner core
//!
//! Warehouse pick routing over a layout graph, plus picker assignment
//! driven by a learned completion-time model.

pub mod error;
pub mod table;
pub mod models;
pub mod graph;
pub mod route;
pub mod routing;
pub mod metrics;
pub mod features;
pub mod simulation;
pub mod traits;
pub mod forest;
pub mod model;
pub mod assignment;
pub mod pipeline;

pub use error::{PlannerError, Result};
