//! Lagged and seasonal feature engineering.
//!
//! Six lag features are always derived (cases at lags 1/3/7/14, deaths at
//! lags 1/7), over the date-ordered sequence. Vaccination and stringency
//! lags join the set only when their source columns exist, and the cyclic
//! day-of-year pair only when the country profile enables seasonality. The
//! resulting ordered feature-name list travels with the matrix so the
//! trainer never has to re-probe the data for what was included.

use crate::cleaning::{CleanSeries, CleaningLevel};
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use country_data::CountryProfile;
use std::f64::consts::PI;

/// Case-count lags, in days
pub const CASE_LAGS: [usize; 4] = [1, 3, 7, 14];
/// Death-count lags, in days
pub const DEATH_LAGS: [usize; 2] = [1, 7];
/// Vaccination lag, in days
pub const VACCINATION_LAG: usize = 7;
/// Stringency lag, in days
pub const STRINGENCY_LAG: usize = 1;
/// Period of the seasonal cycle, in days
const SEASONAL_PERIOD: f64 = 365.0;

/// Assembled supervised-learning table for one country
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    /// Country name
    pub country: String,
    /// Ordered feature names, one per column
    pub feature_names: Vec<String>,
    /// Feature rows, parallel to `dates`
    pub rows: Vec<Vec<f64>>,
    /// Regression targets (daily new cases)
    pub targets: Vec<f64>,
    /// Observation dates, ascending
    pub dates: Vec<NaiveDate>,
}

impl FeatureMatrix {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the matrix is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of feature columns
    pub fn width(&self) -> usize {
        self.feature_names.len()
    }
}

/// Build the feature matrix for a cleaned series.
///
/// Leading rows whose lag windows reach before the series start get their
/// missing features filled with 0; a row is discarded only when every
/// feature is missing at once. Afterwards the minimum-row threshold for the
/// cleaning level is re-checked, catching series that cleaning thinned too
/// far.
pub fn build(
    series: &CleanSeries,
    profile: &CountryProfile,
    level: CleaningLevel,
) -> Result<FeatureMatrix> {
    let n = series.len();
    let mut feature_names: Vec<String> = Vec::new();

    for lag in CASE_LAGS {
        feature_names.push(format!("cases_lag_{}", lag));
    }
    for lag in DEATH_LAGS {
        feature_names.push(format!("deaths_lag_{}", lag));
    }
    let has_vaccinations = series.new_vaccinations.is_some();
    if has_vaccinations {
        feature_names.push(format!("vaccinations_lag_{}", VACCINATION_LAG));
    }
    let has_stringency = series.stringency_index.is_some();
    if has_stringency {
        feature_names.push(format!("stringency_lag_{}", STRINGENCY_LAG));
    }
    if profile.seasonal_factor {
        feature_names.push("seasonal_sin".to_string());
        feature_names.push("seasonal_cos".to_string());
    }

    let mut rows = Vec::with_capacity(n);
    let mut targets = Vec::with_capacity(n);
    let mut dates = Vec::with_capacity(n);

    for i in 0..n {
        let mut features: Vec<Option<f64>> = Vec::with_capacity(feature_names.len());

        for lag in CASE_LAGS {
            features.push(lagged(&series.new_cases, i, lag));
        }
        for lag in DEATH_LAGS {
            features.push(lagged(&series.new_deaths, i, lag));
        }
        if let Some(vaccinations) = series.new_vaccinations.as_ref() {
            features.push(lagged(vaccinations, i, VACCINATION_LAG));
        }
        if let Some(stringency) = series.stringency_index.as_ref() {
            features.push(lagged(stringency, i, STRINGENCY_LAG));
        }
        if profile.seasonal_factor {
            let angle = 2.0 * PI * f64::from(series.dates[i].ordinal()) / SEASONAL_PERIOD;
            features.push(Some(angle.sin()));
            features.push(Some(angle.cos()));
        }

        // Only a row with no usable feature at all is discarded.
        if features.iter().all(Option::is_none) {
            continue;
        }

        rows.push(features.into_iter().map(|v| v.unwrap_or(0.0)).collect());
        targets.push(series.new_cases[i]);
        dates.push(series.dates[i]);
    }

    let required = level.min_rows_after_features();
    if rows.len() < required {
        return Err(ForecastError::InsufficientData {
            country: series.country.clone(),
            rows: rows.len(),
            required,
        });
    }

    Ok(FeatureMatrix {
        country: series.country.clone(),
        feature_names,
        rows,
        targets,
        dates,
    })
}

/// Value `lag` positions back in the date-ordered sequence
fn lagged(values: &[f64], index: usize, lag: usize) -> Option<f64> {
    index.checked_sub(lag).map(|j| values[j])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lagged_reaches_backwards_only() {
        let values = [10.0, 20.0, 30.0];
        assert_eq!(lagged(&values, 2, 1), Some(20.0));
        assert_eq!(lagged(&values, 2, 2), Some(10.0));
        assert_eq!(lagged(&values, 1, 3), None);
    }
}
