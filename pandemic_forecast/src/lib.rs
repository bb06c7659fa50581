//! # Pandemic Forecast
//!
//! A Rust library for short-horizon pandemic case forecasting, per country,
//! from a longitudinal epidemiological dataset.
//!
//! ## Features
//!
//! - Dataset loading with a bundled-sample fallback path
//! - Configurable cleaning presets (minimal / standard / strict)
//! - Lagged and seasonal feature engineering driven by column availability
//!   and per-country configuration
//! - Three regression model families (linear, random forest, gradient
//!   boosting) behind one fit/predict interface, trained on a leakage-safe
//!   chronological split
//! - Synthetic degraded-mode output when the compute engine is unavailable
//! - Sequential batch orchestration across all configured countries
//!
//! ## Quick Start
//!
//! ```no_run
//! use pandemic_forecast::{predict_cases, CleaningLevel, ModelKind, PredictionRequest};
//!
//! let request = PredictionRequest::new(
//!     "Senegal",
//!     ModelKind::RandomForest,
//!     7,
//!     CleaningLevel::Standard,
//! )?;
//!
//! let result = predict_cases(&request)?;
//! for point in &result.predictions {
//!     println!("{}: {:.0} expected cases", point.date, point.prediction);
//! }
//! # Ok::<(), pandemic_forecast::ForecastError>(())
//! ```
//!
//! The forecast is a nearcast over the most recent feature rows, not a
//! recursive multi-step extrapolation; see [`forecast`] for the exact
//! semantics.

pub mod batch;
pub mod cleaning;
pub mod data;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod features;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod scaling;
pub mod training;

// Re-export commonly used types
pub use crate::batch::{predict_all, BatchPrediction, BatchSummary};
pub use crate::cleaning::CleaningLevel;
pub use crate::data::{CaseTable, CountrySeries, DatasetLoader};
pub use crate::engine::ComputeEngine;
pub use crate::error::{ForecastError, Result};
pub use crate::forecast::PredictedPoint;
pub use crate::metrics::RegressionMetrics;
pub use crate::pipeline::{
    country_listing, list_countries, predict_cases, CountryListing, PredictionRequest,
    PredictionResult,
};
pub use country_data::{CountryProfile, ModelKind};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
