//! Metrics for evaluating regression performance

use crate::error::{ForecastError, Result};
use serde::Serialize;

/// Regression evaluation metrics.
///
/// Every metric is reported as `None` when the raw computation yields a
/// non-finite value, so NaN/Inf never reach serialized output. `r2` is the
/// raw coefficient of determination (possibly negative); `r2_normalized` is
/// the UI-safe variant clipped into [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionMetrics {
    /// Root mean squared error
    pub rmse: Option<f64>,
    /// Mean absolute error
    pub mae: Option<f64>,
    /// Coefficient of determination
    pub r2: Option<f64>,
    /// R² clipped into [0, 1] for display
    pub r2_normalized: Option<f64>,
}

/// Evaluate predictions against actual values
pub fn evaluate(predicted: &[f64], actual: &[f64]) -> Result<RegressionMetrics> {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return Err(ForecastError::DataError(
            "predicted and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = predicted.len() as f64;
    let errors: Vec<f64> = predicted
        .iter()
        .zip(actual.iter())
        .map(|(&p, &a)| a - p)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    let actual_mean = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|&a| (a - actual_mean).powi(2)).sum();
    let ss_res: f64 = errors.iter().map(|e| e.powi(2)).sum();
    // A constant test series makes ss_tot zero; the division then yields a
    // non-finite value and sanitization reports the metric as absent.
    let r2 = 1.0 - ss_res / ss_tot;

    Ok(RegressionMetrics {
        rmse: sanitize(rmse),
        mae: sanitize(mae),
        r2: sanitize(r2),
        r2_normalized: sanitize(r2).map(|v| v.clamp(0.0, 1.0)),
    })
}

/// Report non-finite values as absent
pub fn sanitize(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
