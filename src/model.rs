//! Learned completion-time model.
//!
//! Wraps a [`Regressor`] with the fixed feature layout from
//! [`crate::features`], so callers fit on training records (or a training
//! table) and query with encoded (order, picker) rows.

use tracing::debug;

use crate::error::Result;
use crate::features::{FEATURE_COLUMNS, FeatureVector, TARGET_COLUMN};
use crate::forest::{ForestOptions, RandomForestRegressor};
use crate::simulation::TrainingRecord;
use crate::table::Table;
use crate::traits::Regressor;

/// Predicts how long a picker takes to complete an order.
#[derive(Debug, Clone)]
pub struct CompletionTimeModel<R: Regressor = RandomForestRegressor> {
    regressor: R,
}

impl<R: Regressor> CompletionTimeModel<R> {
    /// Fits `regressor` on already-encoded rows.
    pub fn fit(mut regressor: R, features: &[FeatureVector], targets: &[f64]) -> Result<Self> {
        let matrix: Vec<Vec<f64>> = features.iter().map(|row| row.to_vec()).collect();
        regressor.fit(&matrix, targets)?;
        debug!(rows = matrix.len(), "fitted completion-time model");
        Ok(Self { regressor })
    }

    /// Fits `regressor` on synthesized training records.
    pub fn fit_records(regressor: R, records: &[TrainingRecord]) -> Result<Self> {
        let features: Vec<FeatureVector> = records.iter().map(TrainingRecord::features).collect();
        let targets: Vec<f64> = records.iter().map(|r| r.completion_time).collect();
        Self::fit(regressor, &features, &targets)
    }

    /// Fits `regressor` on a table holding every [`FEATURE_COLUMNS`] entry
    /// and the target column, in any column order.
    pub fn fit_table(regressor: R, table: &Table) -> Result<Self> {
        let feature_cols = table.require(&FEATURE_COLUMNS)?;
        let target_col = table.column(TARGET_COLUMN)?;

        let mut features = Vec::with_capacity(table.len());
        let mut targets = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let mut encoded = [0.0; FEATURE_COLUMNS.len()];
            for (slot, &col) in encoded.iter_mut().zip(&feature_cols) {
                *slot = table.cell_f64(row, col)?;
            }
            features.push(encoded);
            targets.push(table.cell_f64(row, target_col)?);
        }

        Self::fit(regressor, &features, &targets)
    }

    /// Predicted completion time per row.
    pub fn predict(&self, features: &[FeatureVector]) -> Result<Vec<f64>> {
        let matrix: Vec<Vec<f64>> = features.iter().map(|row| row.to_vec()).collect();
        self.regressor.predict(&matrix)
    }

    pub fn regressor(&self) -> &R {
        &self.regressor
    }
}

/// Trains the default random-forest model on a training table.
pub fn train_picker_model(table: &Table, options: &ForestOptions) -> Result<CompletionTimeModel> {
    CompletionTimeModel::fit_table(RandomForestRegressor::new(options.clone()), table)
}
