//! Configurable data-cleaning stages.
//!
//! Three presets of increasing aggressiveness; each level performs a strict
//! superset of the previous level's operations:
//!
//! - `minimal`: impute missing numeric fields with 0.
//! - `standard`: additionally drop rows with negative daily counts, drop
//!   rows whose new cases exceed 10x the series median, and smooth values
//!   above 5x their centered 7-day rolling mean down to that mean.
//! - `strict`: same steps as `standard` with tighter multiples (5x median,
//!   3x rolling mean).
//!
//! Outlier thresholds are best-effort: a degenerate series (for example an
//! all-zero median) disables the corresponding filter with a warning instead
//! of aborting the pipeline.

use crate::data::CountrySeries;
use crate::error::ForecastError;
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics};
use std::fmt;
use std::str::FromStr;

/// Half-width of the centered rolling-mean window (7 days total)
const ROLLING_HALF_WINDOW: usize = 3;

/// Cleaning aggressiveness preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningLevel {
    /// Null imputation only
    Minimal,
    /// Adds negative-row rejection, median capping, rolling-mean smoothing
    Standard,
    /// Standard with tighter outlier constants
    Strict,
}

impl CleaningLevel {
    /// The wire tag for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            CleaningLevel::Minimal => "minimal",
            CleaningLevel::Standard => "standard",
            CleaningLevel::Strict => "strict",
        }
    }

    /// Rows whose new cases exceed this multiple of the median are dropped
    fn median_cap_multiple(&self) -> Option<f64> {
        match self {
            CleaningLevel::Minimal => None,
            CleaningLevel::Standard => Some(10.0),
            CleaningLevel::Strict => Some(5.0),
        }
    }

    /// Values above this multiple of the rolling mean are smoothed down to it
    fn rolling_cap_multiple(&self) -> Option<f64> {
        match self {
            CleaningLevel::Minimal => None,
            CleaningLevel::Standard => Some(5.0),
            CleaningLevel::Strict => Some(3.0),
        }
    }

    /// Minimum rows that must survive cleaning and feature engineering.
    ///
    /// Strict cleaning discards more, so it demands a larger remainder to
    /// catch the case where cleaning was too aggressive for the series.
    pub fn min_rows_after_features(&self) -> usize {
        match self {
            CleaningLevel::Minimal | CleaningLevel::Standard => 20,
            CleaningLevel::Strict => 30,
        }
    }
}

impl Default for CleaningLevel {
    fn default() -> Self {
        CleaningLevel::Standard
    }
}

impl fmt::Display for CleaningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleaningLevel {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(CleaningLevel::Minimal),
            "standard" => Ok(CleaningLevel::Standard),
            "strict" => Ok(CleaningLevel::Strict),
            other => Err(ForecastError::InvalidParameter(format!(
                "cleaning level '{}' is not supported; available levels: minimal, standard, strict",
                other
            ))),
        }
    }
}

/// A country's series after cleaning: date-ordered, fully imputed
#[derive(Debug, Clone)]
pub struct CleanSeries {
    /// Country name
    pub country: String,
    /// Observation dates, ascending
    pub dates: Vec<NaiveDate>,
    /// Daily new cases
    pub new_cases: Vec<f64>,
    /// Daily new deaths
    pub new_deaths: Vec<f64>,
    /// Daily new vaccinations, when the source column exists
    pub new_vaccinations: Option<Vec<f64>>,
    /// Stringency index, when the source column exists
    pub stringency_index: Option<Vec<f64>>,
    /// Cumulative cases
    pub total_cases: Vec<f64>,
    /// Cumulative deaths
    pub total_deaths: Vec<f64>,
}

impl CleanSeries {
    /// Number of observations
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Keep only the rows at positions where `keep` is true
    fn retain_rows(&mut self, keep: &[bool]) {
        let filter = |values: &mut Vec<f64>| {
            let mut it = keep.iter();
            values.retain(|_| *it.next().unwrap());
        };
        let mut it = keep.iter();
        self.dates.retain(|_| *it.next().unwrap());
        filter(&mut self.new_cases);
        filter(&mut self.new_deaths);
        if let Some(v) = self.new_vaccinations.as_mut() {
            filter(v);
        }
        if let Some(v) = self.stringency_index.as_mut() {
            filter(v);
        }
        filter(&mut self.total_cases);
        filter(&mut self.total_deaths);
    }
}

/// Apply a cleaning level to a raw country series
pub fn apply(series: CountrySeries, level: CleaningLevel) -> CleanSeries {
    let mut clean = impute_nulls(series);

    if let Some(multiple) = level.median_cap_multiple() {
        drop_negative_rows(&mut clean);
        drop_median_outliers(&mut clean, multiple);
    }
    if let Some(multiple) = level.rolling_cap_multiple() {
        smooth_rolling_outliers(&mut clean, multiple);
    }

    clean
}

/// Minimal cleaning: replace missing numeric fields with 0
fn impute_nulls(series: CountrySeries) -> CleanSeries {
    let fill = |values: Vec<Option<f64>>| -> Vec<f64> {
        values.into_iter().map(|v| v.unwrap_or(0.0)).collect()
    };
    CleanSeries {
        country: series.country,
        dates: series.dates,
        new_cases: fill(series.new_cases),
        new_deaths: fill(series.new_deaths),
        new_vaccinations: series.new_vaccinations.map(&fill),
        stringency_index: series.stringency_index.map(&fill),
        total_cases: fill(series.total_cases),
        total_deaths: fill(series.total_deaths),
    }
}

/// Drop rows with negative daily counts (data-entry errors)
fn drop_negative_rows(series: &mut CleanSeries) {
    let keep: Vec<bool> = (0..series.len())
        .map(|i| {
            series.new_cases[i] >= 0.0
                && series.new_deaths[i] >= 0.0
                && series
                    .new_vaccinations
                    .as_ref()
                    .map(|v| v[i] >= 0.0)
                    .unwrap_or(true)
        })
        .collect();
    if keep.iter().any(|k| !k) {
        series.retain_rows(&keep);
    }
}

/// Drop rows whose new cases exceed `multiple` times the series median
fn drop_median_outliers(series: &mut CleanSeries, multiple: f64) {
    let mut data = Data::new(series.new_cases.clone());
    let median = data.median();
    if !median.is_finite() || median <= 0.0 {
        warn!(
            "{}: degenerate new-case median ({}), skipping median outlier filter",
            series.country, median
        );
        return;
    }

    let threshold = multiple * median;
    let keep: Vec<bool> = series.new_cases.iter().map(|&v| v <= threshold).collect();
    if keep.iter().any(|k| !k) {
        series.retain_rows(&keep);
    }
}

/// Smooth values above `multiple` times their centered 7-day rolling mean.
///
/// Smoothing replaces the value with the rolling mean instead of dropping the
/// row, so the series keeps its calendar coverage.
fn smooth_rolling_outliers(series: &mut CleanSeries, multiple: f64) {
    let n = series.new_cases.len();
    if n == 0 {
        return;
    }

    // Means are computed over the original values before any replacement.
    let means: Vec<f64> = (0..n)
        .map(|i| {
            let lo = i.saturating_sub(ROLLING_HALF_WINDOW);
            let hi = (i + ROLLING_HALF_WINDOW + 1).min(n);
            let window = &series.new_cases[lo..hi];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect();

    for i in 0..n {
        if means[i] > 0.0 && series.new_cases[i] > multiple * means[i] {
            series.new_cases[i] = means[i];
        }
    }
}
