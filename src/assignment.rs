//! Picker assignment: score every picker for an order and keep the fastest.

use serde::Serialize;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::features::{FeatureVector, encode_features};
use crate::model::CompletionTimeModel;
use crate::models::Picker;
use crate::traits::Regressor;

/// Outcome of scoring all pickers for one order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerAssignment {
    pub best_picker: String,
    /// Predicted completion time per picker, in picker-table order.
    pub predictions: Vec<(String, f64)>,
}

impl PickerAssignment {
    /// Predicted completion time for one picker.
    pub fn predicted_time(&self, picker_id: &str) -> Option<f64> {
        self.predictions
            .iter()
            .find(|(id, _)| id == picker_id)
            .map(|(_, time)| *time)
    }
}

/// Scores every picker for an order and returns the one with the lowest
/// predicted completion time. Ties go to the picker listed first.
pub fn assign_best_picker<R: Regressor>(
    model: &CompletionTimeModel<R>,
    order_distance: f64,
    order_zone: &str,
    pickers: &[Picker],
) -> Result<PickerAssignment> {
    if pickers.is_empty() {
        return Err(PlannerError::EmptyPickerSet);
    }

    let rows: Vec<FeatureVector> = pickers
        .iter()
        .map(|picker| encode_features(order_distance, order_zone, picker))
        .collect();
    let times = model.predict(&rows)?;

    let mut best = 0;
    for (i, time) in times.iter().enumerate().skip(1) {
        if *time < times[best] {
            best = i;
        }
    }

    let predictions: Vec<(String, f64)> = pickers
        .iter()
        .zip(times)
        .map(|(picker, time)| (picker.picker_id.clone(), time))
        .collect();

    let best_picker = pickers[best].picker_id.clone();
    debug!(order_zone, order_distance, best_picker = %best_picker, "assigned picker");
    Ok(PickerAssignment {
        best_picker,
        predictions,
    })
}
