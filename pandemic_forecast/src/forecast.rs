//! Horizon extrapolation from recent feature context.
//!
//! The forecaster applies the fitted model to the `horizon` most recent rows
//! of the full feature-engineered table and reports those rows' original
//! dates next to the predicted values. This is a nearcast over recent
//! feature context, not true multi-step-ahead forecasting: predictions are
//! never fed back into the lag features. Known limitation, kept on purpose
//! to preserve the established interface behavior.

use crate::features::FeatureMatrix;
use crate::models::FittedRegression;
use crate::scaling::StandardScaler;
use chrono::NaiveDate;
use serde::Serialize;

/// One forecast entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedPoint {
    /// Date of the feature row the prediction was made from
    pub date: NaiveDate,
    /// Predicted daily new cases, never negative
    pub prediction: f64,
}

/// Predict over the most recent `horizon` feature rows.
///
/// Values are clamped at zero, since case counts cannot be negative. When
/// the table holds fewer than `horizon` rows, every available row is used.
pub fn nearcast(
    fitted: &dyn FittedRegression,
    scaler: &StandardScaler,
    matrix: &FeatureMatrix,
    horizon: usize,
) -> Vec<PredictedPoint> {
    let n = matrix.len();
    let start = n.saturating_sub(horizon);

    (start..n)
        .map(|i| {
            let scaled = scaler.transform_row(&matrix.rows[i]);
            PredictedPoint {
                date: matrix.dates[i],
                prediction: fitted.predict_row(&scaled).max(0.0),
            }
        })
        .collect()
}
