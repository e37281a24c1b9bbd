//! Test fixtures for pick-planner.
//!
//! Provides a small two-aisle warehouse layout with matching orders and
//! pickers, as input tables.

pub mod warehouse;

pub use warehouse::*;
