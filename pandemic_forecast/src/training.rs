//! Model training and evaluation

use crate::error::{ForecastError, Result};
use crate::features::FeatureMatrix;
use crate::metrics::{self, RegressionMetrics};
use crate::models::{self, FittedRegression};
use crate::scaling::StandardScaler;
use country_data::ModelKind;
use log::info;

/// Fraction of rows assigned to the train partition
pub const TRAIN_FRACTION: f64 = 0.8;

/// Everything the pipeline needs from one training run
pub struct TrainingOutcome {
    /// The fitted model, alive for this request only
    pub fitted: Box<dyn FittedRegression>,
    /// Scaler fit on the assembled feature vectors
    pub scaler: StandardScaler,
    /// Test-partition evaluation metrics
    pub metrics: RegressionMetrics,
    /// Rows used for training
    pub training_samples: usize,
    /// Rows used for evaluation
    pub test_samples: usize,
}

/// Index of the first test row for a chronological 80/20 split
pub fn split_index(total: usize) -> usize {
    (total as f64 * TRAIN_FRACTION) as usize
}

/// Standardize, split chronologically, fit, and evaluate.
///
/// The split is strictly by date order: the first 80% of rows (by count)
/// train the model and the remainder evaluates it. No shuffling, ever;
/// shuffled splits would leak future information into training.
pub fn train_and_evaluate(kind: ModelKind, matrix: &FeatureMatrix) -> Result<TrainingOutcome> {
    let scaler = StandardScaler::fit(&matrix.rows);
    let rows = scaler.transform(&matrix.rows);

    let train_size = split_index(rows.len());
    if train_size == 0 || train_size == rows.len() {
        return Err(ForecastError::DataError(format!(
            "chronological split over {} rows left an empty partition",
            rows.len()
        )));
    }

    let (train_rows, test_rows) = rows.split_at(train_size);
    let (train_targets, test_targets) = matrix.targets.split_at(train_size);
    info!(
        "{}: training {} on {} rows, evaluating on {}",
        matrix.country,
        kind,
        train_rows.len(),
        test_rows.len()
    );

    let model = models::for_kind(kind);
    let fitted = model.fit(train_rows, train_targets)?;

    let predicted = fitted.predict(test_rows);
    let metrics = metrics::evaluate(&predicted, test_targets)?;

    Ok(TrainingOutcome {
        fitted,
        scaler,
        metrics,
        training_samples: train_size,
        test_samples: rows.len() - train_size,
    })
}
