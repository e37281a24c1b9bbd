//! Completion-time simulation and training-data synthesis.
//!
//! # Algorithm
//!
//! 1. Fill in a zone and a distance for orders that lack them.
//! 2. If there are fewer orders than `n_synthetic_orders`, resample that
//!    many with replacement and re-draw each copy's distance and zone.
//! 3. Cross every order with every picker and label the pair with the
//!    simulated completion time.
//!
//! All randomness comes from the caller's generator.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::features::{FEATURE_COLUMNS, FeatureVector, TARGET_COLUMN, encode_features};
use crate::models::Picker;
use crate::table::Table;

/// Lower bound on speed when dividing distance by it.
pub const SPEED_EPSILON: f64 = 1e-6;

/// Options for training-data synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    /// Minimum number of orders after resampling.
    pub n_synthetic_orders: usize,
    /// Inclusive lower bound of drawn order distances.
    pub min_order_distance: u32,
    /// Exclusive upper bound of drawn order distances.
    pub max_order_distance: u32,
    /// Zones drawn uniformly for synthetic orders.
    pub zones: Vec<String>,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            n_synthetic_orders: 200,
            min_order_distance: 40,
            max_order_distance: 120,
            zones: vec!["A".to_string(), "B".to_string()],
        }
    }
}

impl SynthesisOptions {
    /// Rejects an empty distance range or an empty zone list.
    pub fn validate(&self) -> Result<()> {
        if self.min_order_distance >= self.max_order_distance {
            return Err(PlannerError::Config(format!(
                "order distance range [{}, {}) is empty",
                self.min_order_distance, self.max_order_distance
            )));
        }
        if self.zones.is_empty() {
            return Err(PlannerError::Config("no zones to draw from".to_string()));
        }
        Ok(())
    }

    fn draw_distance<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        f64::from(rng.gen_range(self.min_order_distance..self.max_order_distance))
    }

    // Callers validate first, so `zones` is non-empty.
    fn draw_zone<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.zones.choose(rng).cloned().unwrap_or_default()
    }
}

/// Simulated completion time: travel time plus a rework penalty
/// proportional to the picker's error rate.
pub fn simulate_completion_time(distance: f64, avg_speed: f64, error_rate: f64) -> f64 {
    let base = distance / avg_speed.max(SPEED_EPSILON);
    base + base * error_rate
}

/// An order as seen by the synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSample {
    pub order_id: String,
    pub order_distance: Option<f64>,
    pub order_zone: Option<String>,
}

impl OrderSample {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            order_distance: None,
            order_zone: None,
        }
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.order_distance = Some(distance);
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.order_zone = Some(zone.into());
        self
    }
}

/// One labelled (order, picker) row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRecord {
    pub order_id: String,
    pub picker_id: String,
    pub order_distance: f64,
    pub avg_speed: f64,
    pub error_rate: f64,
    pub experience_years: f64,
    pub zone_match: f64,
    pub order_zone_a: f64,
    pub order_zone_b: f64,
    pub completion_time: f64,
}

impl TrainingRecord {
    fn label(order_id: &str, order_distance: f64, order_zone: &str, picker: &Picker) -> Self {
        let [
            order_distance,
            avg_speed,
            error_rate,
            experience_years,
            zone_match,
            order_zone_a,
            order_zone_b,
        ] = encode_features(order_distance, order_zone, picker);

        Self {
            order_id: order_id.to_string(),
            picker_id: picker.picker_id.clone(),
            order_distance,
            avg_speed,
            error_rate,
            experience_years,
            zone_match,
            order_zone_a,
            order_zone_b,
            completion_time: simulate_completion_time(order_distance, avg_speed, error_rate),
        }
    }

    /// Features in [`FEATURE_COLUMNS`] order.
    pub fn features(&self) -> FeatureVector {
        [
            self.order_distance,
            self.avg_speed,
            self.error_rate,
            self.experience_years,
            self.zone_match,
            self.order_zone_a,
            self.order_zone_b,
        ]
    }
}

/// Expands orders into a labelled training set of
/// `max(orders, n_synthetic_orders) × pickers` rows.
pub fn build_training_data<R: Rng + ?Sized>(
    orders: &[OrderSample],
    pickers: &[Picker],
    options: &SynthesisOptions,
    rng: &mut R,
) -> Result<Vec<TrainingRecord>> {
    options.validate()?;
    if orders.is_empty() {
        return Err(PlannerError::EmptyOrderSet);
    }
    if pickers.is_empty() {
        return Err(PlannerError::EmptyPickerSet);
    }

    let mut filled: Vec<(String, f64, String)> = orders
        .iter()
        .map(|order| {
            let zone = match &order.order_zone {
                Some(zone) => zone.clone(),
                None => options.draw_zone(rng),
            };
            let distance = match order.order_distance {
                Some(distance) => distance,
                None => options.draw_distance(rng),
            };
            (order.order_id.clone(), distance, zone)
        })
        .collect();

    if filled.len() < options.n_synthetic_orders {
        let source = filled;
        filled = (0..options.n_synthetic_orders)
            .map(|_| {
                let (order_id, _, _) = &source[rng.gen_range(0..source.len())];
                let distance = options.draw_distance(rng);
                let zone = options.draw_zone(rng);
                (order_id.clone(), distance, zone)
            })
            .collect();
    }

    let records: Vec<TrainingRecord> = filled
        .iter()
        .flat_map(|(order_id, distance, zone)| {
            pickers
                .iter()
                .map(move |picker| TrainingRecord::label(order_id, *distance, zone, picker))
        })
        .collect();

    debug!(
        orders = filled.len(),
        pickers = pickers.len(),
        rows = records.len(),
        "synthesized training data"
    );
    Ok(records)
}

/// Renders training records as a table with [`FEATURE_COLUMNS`] followed
/// by the target column.
pub fn training_table(records: &[TrainingRecord]) -> Table {
    let mut columns: Vec<&str> = FEATURE_COLUMNS.to_vec();
    columns.push(TARGET_COLUMN);

    let mut table = Table::new("training", &columns);
    for record in records {
        let mut row: Vec<f64> = record.features().to_vec();
        row.push(record.completion_time);
        table.push_row(&row);
    }
    table
}
