//! Core capability traits for the picking planner.
//!
//! Kept minimal: the completion-time model only needs something that can
//! be fitted on a feature matrix and then queried with one.

use crate::error::{PlannerError, Result};

/// A supervised regression model.
///
/// Rows of `features` must all have the same width, and inference must use
/// the column layout the model was fitted with. Implementations must be
/// deterministic for a fixed configuration (including any seed).
pub trait Regressor {
    /// Fits the model, replacing any previous fit.
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<()>;

    /// Predicts one value per feature row.
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>>;
}

/// Checks a training matrix and returns its width.
pub(crate) fn check_training_shape(features: &[Vec<f64>], targets: &[f64]) -> Result<usize> {
    if features.is_empty() {
        return Err(PlannerError::Model("empty training matrix".to_string()));
    }
    if features.len() != targets.len() {
        return Err(PlannerError::Model(format!(
            "{} feature rows but {} targets",
            features.len(),
            targets.len()
        )));
    }
    let width = features[0].len();
    check_width(features, width)?;
    Ok(width)
}

/// Checks every row has `width` columns.
pub(crate) fn check_width(features: &[Vec<f64>], width: usize) -> Result<()> {
    match features.iter().position(|row| row.len() != width) {
        Some(row) => Err(PlannerError::Model(format!(
            "row {row} has {} features, expected {width}",
            features[row].len()
        ))),
        None => Ok(()),
    }
}

/// Baseline regressor predicting the training mean for every row.
#[derive(Debug, Clone, Default)]
pub struct MeanRegressor {
    fitted: Option<(usize, f64)>,
}

impl MeanRegressor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Regressor for MeanRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let width = check_training_shape(features, targets)?;
        let mean = targets.iter().sum::<f64>() / targets.len() as f64;
        self.fitted = Some((width, mean));
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>> {
        let (width, mean) = self
            .fitted
            .ok_or_else(|| PlannerError::Model("model is not fitted".to_string()))?;
        check_width(features, width)?;
        Ok(vec![mean; features.len()])
    }
}
