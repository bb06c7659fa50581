//! Regression model families for case forecasting.
//!
//! The three supported families sit behind a uniform fit/predict capability
//! pair so the pipeline can dispatch on the request's model tag without
//! knowing anything model-specific. Unknown tags never reach this module;
//! they are rejected when the request is parsed.

use crate::error::Result;
use country_data::ModelKind;
use std::fmt::Debug;

pub mod gradient_boost;
pub mod linear;
pub mod random_forest;
mod tree;

pub use gradient_boost::GradientBoostRegressor;
pub use linear::RidgeRegression;
pub use random_forest::RandomForestRegressor;

/// A configured, untrained regression model
pub trait RegressionModel: Debug {
    /// Fit the model on feature rows and targets
    fn fit(&self, rows: &[Vec<f64>], targets: &[f64]) -> Result<Box<dyn FittedRegression>>;

    /// Name of the model
    fn name(&self) -> &'static str;
}

/// A fitted regression model, scoped to a single pipeline run
pub trait FittedRegression: Debug {
    /// Predict the target for one feature row
    fn predict_row(&self, features: &[f64]) -> f64;

    /// Predict targets for a batch of feature rows
    fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Build the model for a tag, with the family's fixed hyperparameters
pub fn for_kind(kind: ModelKind) -> Box<dyn RegressionModel> {
    match kind {
        ModelKind::Linear => Box::new(RidgeRegression::default()),
        ModelKind::RandomForest => Box::new(RandomForestRegressor::default()),
        ModelKind::GradientBoost => Box::new(GradientBoostRegressor::default()),
    }
}

/// Shared input validation for the fit implementations
pub(crate) fn check_training_input(rows: &[Vec<f64>], targets: &[f64]) -> Result<usize> {
    use crate::error::ForecastError;

    if rows.is_empty() || rows.len() != targets.len() {
        return Err(ForecastError::DataError(format!(
            "training rows ({}) and targets ({}) must have the same non-zero length",
            rows.len(),
            targets.len()
        )));
    }
    let width = rows[0].len();
    if width == 0 || rows.iter().any(|r| r.len() != width) {
        return Err(ForecastError::DataError(
            "training rows must share a non-zero feature width".to_string(),
        ));
    }
    Ok(width)
}
