//! Synthetic results for degraded mode.
//!
//! When the compute engine cannot be initialized the pipeline still has to
//! honor its interface contract, so this module fabricates a structurally
//! identical result: a plausible forecast curve, sample counts, and metrics.
//! The output is always branded with `fallback_mode = true` and a warning
//! string. Synthetic data must never masquerade as a real prediction.

use crate::forecast::PredictedPoint;
use crate::metrics::{sanitize, RegressionMetrics};
use crate::pipeline::{PredictionRequest, PredictionResult};
use chrono::{Duration, Utc};
use country_data::{profile_or_default, ModelKind};
use log::warn;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Feature names reported by synthetic results
const FALLBACK_FEATURES: [&str; 8] = [
    "cases_lag_1",
    "cases_lag_3",
    "cases_lag_7",
    "cases_lag_14",
    "deaths_lag_1",
    "deaths_lag_7",
    "seasonal_sin",
    "seasonal_cos",
];

/// Baseline model quality used to shape synthetic metrics
fn quality_baseline(model: ModelKind) -> f64 {
    match model {
        ModelKind::Linear => 0.70,
        ModelKind::RandomForest => 0.85,
        ModelKind::GradientBoost => 0.92,
    }
}

/// Build a synthetic result mirroring the real output schema
pub fn synthetic_result(request: &PredictionRequest, reason: &str) -> PredictionResult {
    warn!(
        "{}: compute engine unavailable ({}), generating fallback forecast",
        request.country, reason
    );

    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    let mut base = rng.gen_range(100..1000) as f64;
    let mut predictions = Vec::with_capacity(request.horizon);
    for day in 0..request.horizon {
        // Bounded day-over-day movement keeps the curve plausible.
        let variation = (rng.gen::<f64>() - 0.5) * 0.3;
        predictions.push(PredictedPoint {
            date: today + Duration::days(day as i64 + 1),
            prediction: (base * (1.0 + variation)).max(0.0),
        });
        base *= 1.0 + (rng.gen::<f64>() - 0.5) * 0.1;
    }

    let quality = quality_baseline(request.model);
    let rmse = 50.0 * (1.0 - quality) + Uniform::new(10.0, 30.0).sample(&mut rng);
    let mae = 35.0 * (1.0 - quality) + Uniform::new(5.0, 20.0).sample(&mut rng);
    let r2 = quality + Uniform::new(-0.05, 0.05).sample(&mut rng);
    let metrics = RegressionMetrics {
        rmse: sanitize(rmse),
        mae: sanitize(mae),
        r2: sanitize(r2),
        r2_normalized: sanitize(r2).map(|v| v.clamp(0.0, 1.0)),
    };

    PredictionResult {
        country: request.country.clone(),
        model_type: request.model,
        horizon_days: request.horizon,
        cleaning_level: request.cleaning_level,
        training_samples: rng.gen_range(800..1500),
        test_samples: rng.gen_range(200..400),
        features_used: FALLBACK_FEATURES.iter().map(|s| s.to_string()).collect(),
        metrics,
        predictions,
        country_profile: profile_or_default(&request.country).clone(),
        fallback_mode: true,
        warning: Some(format!(
            "compute engine unavailable ({}); returning synthetic forecast data",
            reason
        )),
    }
}
