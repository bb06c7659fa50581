//! Error types for the pandemic_forecast crate

use country_data::UnknownModelKind;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the pandemic_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Requested country is absent from the dataset
    #[error("country '{country}' not found in dataset; available countries include: {}", sample.join(", "))]
    UnknownCountry {
        /// The country that was requested
        country: String,
        /// A sorted sample of valid country names (at most ten)
        sample: Vec<String>,
    },

    /// Too few rows to train on, before or after cleaning and feature engineering
    #[error("insufficient data for country '{country}': {rows} rows available, at least {required} required")]
    InsufficientData {
        country: String,
        rows: usize,
        required: usize,
    },

    /// Invalid model tag
    #[error("model type '{0}' is not supported; available models: linear, random_forest, gradient_boost")]
    UnsupportedModel(String),

    /// Neither the primary nor the bundled sample dataset could be read
    #[error("data source unavailable: {0}")]
    DataSourceUnavailable(String),

    /// The compute engine could not be initialized
    #[error("compute engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Error from invalid request parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("dataframe error: {0}")]
    PolarsError(String),

    /// Unclassified internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl ForecastError {
    /// Whether this error is a validation-class (caller) error.
    ///
    /// The HTTP boundary maps validation errors to 400 responses and
    /// everything else to 500.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ForecastError::UnknownCountry { .. }
                | ForecastError::InsufficientData { .. }
                | ForecastError::UnsupportedModel(_)
                | ForecastError::InvalidParameter(_)
        )
    }
}

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<UnknownModelKind> for ForecastError {
    fn from(err: UnknownModelKind) -> Self {
        ForecastError::UnsupportedModel(err.0)
    }
}
