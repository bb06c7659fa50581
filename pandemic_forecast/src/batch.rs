//! Batch orchestration across all configured countries.
//!
//! Each configured country runs through the full pipeline sequentially,
//! never concurrently, so one country's memory use does not compound with
//! another's. On this fan-out path the country's recommended model takes
//! precedence over the caller-supplied default; single-country prediction
//! deliberately does not share that behavior. One country's failure is
//! captured in the failure list and never aborts the batch.

use crate::error::Result;
use crate::pipeline::{predict_cases, PredictionRequest, PredictionResult};
use country_data::{profiles, Continent, ModelKind};
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One country's captured failure
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    /// Country that failed
    pub country: String,
    /// Error message, already rendered for the caller
    pub error: String,
}

/// Counts and parameters describing a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Configured countries processed
    pub total_countries: usize,
    /// Of those, countries on the African continent
    pub african_countries: usize,
    /// Remaining configured countries
    pub other_countries: usize,
    /// Caller-supplied default model
    pub model_type: ModelKind,
    /// Horizon applied to every country
    pub horizon_days: usize,
}

/// Aggregate outcome of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchPrediction {
    /// Per-country results, keyed by country name
    pub predictions_by_country: BTreeMap<String, PredictionResult>,
    /// Countries whose pipeline failed
    pub failures: Vec<BatchFailure>,
    /// Run description
    pub summary: BatchSummary,
}

/// Run the pipeline for every configured country.
///
/// `default_model` only describes the run in the summary; each country
/// trains its recommended model.
pub fn predict_all(
    default_model: ModelKind,
    horizon: usize,
    data_path: Option<&Path>,
) -> Result<BatchPrediction> {
    let mut predictions_by_country = BTreeMap::new();
    let mut failures = Vec::new();
    let mut african_countries = 0;

    for profile in profiles().values() {
        if profile.continent == Continent::Africa {
            african_countries += 1;
        }

        let request = PredictionRequest::new(
            profile.name,
            profile.recommended_model,
            horizon,
            Default::default(),
        )?;
        let request = match data_path {
            Some(path) => request.with_data_path(path),
            None => request,
        };

        match predict_cases(&request) {
            Ok(result) => {
                predictions_by_country.insert(profile.name.to_string(), result);
            }
            Err(err) => {
                warn!("{}: batch prediction failed: {}", profile.name, err);
                failures.push(BatchFailure {
                    country: profile.name.to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    let total_countries = profiles().len();
    info!(
        "batch run finished: {} succeeded, {} failed",
        predictions_by_country.len(),
        failures.len()
    );

    Ok(BatchPrediction {
        predictions_by_country,
        failures,
        summary: BatchSummary {
            total_countries,
            african_countries,
            other_countries: total_countries - african_countries,
            model_type: default_model,
            horizon_days: horizon,
        },
    })
}
