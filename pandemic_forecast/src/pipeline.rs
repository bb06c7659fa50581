//! The per-country prediction pipeline.
//!
//! Orchestrates the full chain: dataset loading, country gating, cleaning,
//! feature engineering, training/evaluation, and the horizon nearcast. When
//! the compute engine is down the chain is replaced wholesale by the
//! synthetic fallback so the interface contract never breaks.

use crate::cleaning::{self, CleaningLevel};
use crate::data::DatasetLoader;
use crate::engine::ComputeEngine;
use crate::error::{ForecastError, Result};
use crate::fallback;
use crate::features;
use crate::forecast::{self, PredictedPoint};
use crate::metrics::RegressionMetrics;
use crate::training;
use country_data::{profile_for, profile_or_default, ModelKind};
use log::{error, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Smallest accepted forecast horizon, in days
pub const MIN_HORIZON: usize = 1;
/// Largest accepted forecast horizon, in days
pub const MAX_HORIZON: usize = 30;
/// Default horizon for single-country predictions
pub const DEFAULT_HORIZON: usize = 14;
/// Default horizon for batch predictions
pub const DEFAULT_BATCH_HORIZON: usize = 7;
/// Default model family
pub const DEFAULT_MODEL: ModelKind = ModelKind::Linear;

/// Countries quoted back when listing is degraded or truncated
const OTHER_COUNTRIES_LIMIT: usize = 50;

/// A validated prediction request
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    /// Country to forecast
    pub country: String,
    /// Model family to train
    pub model: ModelKind,
    /// Number of days to predict
    pub horizon: usize,
    /// Cleaning preset applied before feature engineering
    pub cleaning_level: CleaningLevel,
    /// Primary dataset path; the bundled sample is used when absent
    pub data_path: Option<PathBuf>,
}

impl PredictionRequest {
    /// Create a request, enforcing the boundary validation rules:
    /// non-empty country and horizon within [1, 30].
    pub fn new(
        country: impl Into<String>,
        model: ModelKind,
        horizon: usize,
        cleaning_level: CleaningLevel,
    ) -> Result<Self> {
        let country = country.into();
        if country.trim().is_empty() {
            return Err(ForecastError::InvalidParameter(
                "country must not be empty".to_string(),
            ));
        }
        if !(MIN_HORIZON..=MAX_HORIZON).contains(&horizon) {
            return Err(ForecastError::InvalidParameter(format!(
                "horizon must be between {} and {} days, got {}",
                MIN_HORIZON, MAX_HORIZON, horizon
            )));
        }
        Ok(Self {
            country,
            model,
            horizon,
            cleaning_level,
            data_path: None,
        })
    }

    /// Create a request from raw query-parameter tags
    pub fn from_tags(
        country: &str,
        model: &str,
        horizon: usize,
        cleaning_level: &str,
    ) -> Result<Self> {
        let model: ModelKind = model.parse()?;
        let cleaning_level: CleaningLevel = cleaning_level.parse()?;
        Self::new(country, model, horizon, cleaning_level)
    }

    /// Use an explicit dataset path instead of the bundled sample
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }
}

/// The one record that escapes the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// Country the forecast is for
    pub country: String,
    /// Model family that produced it
    pub model_type: ModelKind,
    /// Number of prediction entries requested
    pub horizon_days: usize,
    /// Cleaning preset that was applied
    pub cleaning_level: CleaningLevel,
    /// Rows used for training
    pub training_samples: usize,
    /// Rows used for evaluation
    pub test_samples: usize,
    /// Ordered feature names that fed the model
    pub features_used: Vec<String>,
    /// Test-partition metrics, sanitized
    pub metrics: RegressionMetrics,
    /// Ordered (date, prediction) pairs
    pub predictions: Vec<PredictedPoint>,
    /// Snapshot of the country profile the run used
    pub country_profile: country_data::CountryProfile,
    /// True when this result is synthetic degraded-mode output
    pub fallback_mode: bool,
    /// Human-readable degradation warning, absent for real results
    pub warning: Option<String>,
}

impl PredictionResult {
    /// Serialize to the JSON payload the HTTP boundary serves
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ForecastError::Internal(format!("result serialization failed: {}", e)))
    }
}

/// Run the full pipeline for one country.
///
/// An unavailable compute engine is not an error here: the synthetic
/// fallback result is returned instead, flagged as such. Validation errors
/// (unknown country, insufficient data) surface to the caller; anything
/// unexpected is logged with country/model context before propagating.
pub fn predict_cases(request: &PredictionRequest) -> Result<PredictionResult> {
    if let Err(engine_err) = ComputeEngine::global() {
        return Ok(fallback::synthetic_result(request, &engine_err.to_string()));
    }

    run_pipeline(request).map_err(|err| {
        if !err.is_validation() {
            error!(
                "{} ({}): prediction failed: {}",
                request.country, request.model, err
            );
        }
        err
    })
}

fn run_pipeline(request: &PredictionRequest) -> Result<PredictionResult> {
    let table = DatasetLoader::load(request.data_path.as_deref())?;
    let series = table.country_series(&request.country)?;
    let profile = profile_or_default(&request.country);

    let cleaned = cleaning::apply(series, request.cleaning_level);
    let matrix = features::build(&cleaned, profile, request.cleaning_level)?;

    let outcome = training::train_and_evaluate(request.model, &matrix)?;
    let predictions = forecast::nearcast(
        outcome.fitted.as_ref(),
        &outcome.scaler,
        &matrix,
        request.horizon,
    );

    info!(
        "{}: {} forecast over {} days, rmse {:?}",
        request.country, request.model, request.horizon, outcome.metrics.rmse
    );

    Ok(PredictionResult {
        country: request.country.clone(),
        model_type: request.model,
        horizon_days: request.horizon,
        cleaning_level: request.cleaning_level,
        training_samples: outcome.training_samples,
        test_samples: outcome.test_samples,
        features_used: matrix.feature_names.clone(),
        metrics: outcome.metrics,
        predictions,
        country_profile: profile.clone(),
        fallback_mode: false,
        warning: None,
    })
}

/// Distinct countries available in the dataset, sorted.
///
/// Degraded mode: when the compute engine is down the statically configured
/// country names are returned instead, so the listing contract never breaks.
pub fn list_countries(data_path: Option<&Path>) -> Result<Vec<String>> {
    if let Err(engine_err) = ComputeEngine::global() {
        warn!(
            "listing configured countries only: {}",
            engine_err
        );
        return Ok(country_data::configured_countries()
            .into_iter()
            .map(|s| s.to_string())
            .collect());
    }

    DatasetLoader::load(data_path)?.countries()
}

/// A configured country surfaced with its profile
#[derive(Debug, Clone, Serialize)]
pub struct FeaturedCountry {
    /// Country name
    pub name: String,
    /// Its static configuration
    pub profile: country_data::CountryProfile,
}

/// Country listing partitioned into configured and other countries
#[derive(Debug, Clone, Serialize)]
pub struct CountryListing {
    /// Total distinct countries in the dataset
    pub total_countries: usize,
    /// Countries with a dedicated profile
    pub featured_countries: Vec<FeaturedCountry>,
    /// Remaining countries, truncated to keep responses small
    pub other_countries: Vec<String>,
}

/// Build the partitioned country listing for the boundary layer
pub fn country_listing(data_path: Option<&Path>) -> Result<CountryListing> {
    let countries = list_countries(data_path)?;
    let total_countries = countries.len();

    let mut featured_countries = Vec::new();
    let mut other_countries = Vec::new();
    for name in countries {
        match profile_for(&name) {
            Some(profile) => featured_countries.push(FeaturedCountry {
                name,
                profile: profile.clone(),
            }),
            None => other_countries.push(name),
        }
    }
    other_countries.truncate(OTHER_COUNTRIES_LIMIT);

    Ok(CountryListing {
        total_countries,
        featured_countries,
        other_countries,
    })
}
