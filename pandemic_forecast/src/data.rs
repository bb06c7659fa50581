//! Dataset loading and per-country series extraction

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use log::warn;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Column holding the country name
pub const LOCATION_COLUMN: &str = "location";
/// Column holding the observation date
pub const DATE_COLUMN: &str = "date";

/// Minimum number of raw rows a country must have before cleaning
pub const MIN_RAW_ROWS: usize = 10;

/// Maximum number of valid country names quoted in an `UnknownCountry` error
const COUNTRY_SAMPLE_LIMIT: usize = 10;

/// Loader for the longitudinal case dataset
#[derive(Debug)]
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load the dataset from `path`, falling back to the bundled sample.
    ///
    /// Two-tier resolution: any read failure on the primary path (missing
    /// file, parse error) is logged and the bundled sample dataset is tried
    /// next. Only when both are unreadable does this fail, with
    /// [`ForecastError::DataSourceUnavailable`].
    pub fn load(path: Option<&Path>) -> Result<CaseTable> {
        let sample = Self::sample_data_path();
        let primary = path.unwrap_or(&sample);

        match Self::read_csv(primary) {
            Ok(df) => Ok(CaseTable::new(df)),
            Err(primary_err) => {
                if primary == sample {
                    return Err(ForecastError::DataSourceUnavailable(format!(
                        "sample dataset {} unreadable: {}",
                        sample.display(),
                        primary_err
                    )));
                }
                warn!(
                    "data file {} unreadable ({}), using sample data",
                    primary.display(),
                    primary_err
                );
                match Self::read_csv(&sample) {
                    Ok(df) => Ok(CaseTable::new(df)),
                    Err(sample_err) => Err(ForecastError::DataSourceUnavailable(format!(
                        "primary {} ({}) and sample {} ({}) both unreadable",
                        primary.display(),
                        primary_err,
                        sample.display(),
                        sample_err
                    ))),
                }
            }
        }
    }

    /// Path of the bundled sample dataset
    pub fn sample_data_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data/owid-covid-data-sample.csv")
    }

    fn read_csv(path: &Path) -> Result<DataFrame> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;
        Ok(df)
    }
}

/// Loaded case dataset
#[derive(Debug, Clone)]
pub struct CaseTable {
    df: DataFrame,
}

impl CaseTable {
    /// Wrap an already-loaded DataFrame
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Get the underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Whether the table has a column with the given name
    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_names().iter().any(|c| *c == name)
    }

    /// Distinct country names present in the dataset, sorted
    pub fn countries(&self) -> Result<Vec<String>> {
        let col = self.df.column(LOCATION_COLUMN).map_err(|_| {
            ForecastError::DataError(format!("dataset has no '{}' column", LOCATION_COLUMN))
        })?;
        let names: BTreeSet<String> = match col.dtype() {
            DataType::Utf8 => col
                .utf8()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|s| s.to_string())
                .collect(),
            other => {
                return Err(ForecastError::DataError(format!(
                    "'{}' column has non-string type {:?}",
                    LOCATION_COLUMN, other
                )))
            }
        };
        Ok(names.into_iter().collect())
    }

    /// Extract the date-ordered series for one country.
    ///
    /// Fails with [`ForecastError::UnknownCountry`] when the country is not
    /// in the distinct-location set, and with
    /// [`ForecastError::InsufficientData`] when fewer than [`MIN_RAW_ROWS`]
    /// rows remain after filtering.
    pub fn country_series(&self, country: &str) -> Result<CountrySeries> {
        let countries = self.countries()?;
        if !countries.iter().any(|c| c == country) {
            let sample = countries.into_iter().take(COUNTRY_SAMPLE_LIMIT).collect();
            return Err(ForecastError::UnknownCountry {
                country: country.to_string(),
                sample,
            });
        }

        let locations = self.utf8_values(LOCATION_COLUMN)?;
        let dates = self.date_values(DATE_COLUMN)?;

        // Indices of this country's rows; rows with no parsable date cannot
        // be ordered and are skipped.
        let mut picked: Vec<(NaiveDate, usize)> = Vec::new();
        for (i, loc) in locations.iter().enumerate() {
            if loc.as_deref() == Some(country) {
                match dates[i] {
                    Some(date) => picked.push((date, i)),
                    None => warn!("dropping {} row {} with unreadable date", country, i),
                }
            }
        }
        picked.sort_by_key(|(date, _)| *date);

        if picked.len() < MIN_RAW_ROWS {
            return Err(ForecastError::InsufficientData {
                country: country.to_string(),
                rows: picked.len(),
                required: MIN_RAW_ROWS,
            });
        }

        let indices: Vec<usize> = picked.iter().map(|(_, i)| *i).collect();
        let select = |values: Vec<Option<f64>>| -> Vec<Option<f64>> {
            indices.iter().map(|&i| values[i]).collect()
        };

        let new_cases = select(self.f64_values("new_cases")?);
        let new_deaths = select(self.f64_values("new_deaths")?);
        let total_cases = select(self.f64_values("total_cases")?);
        let total_deaths = select(self.f64_values("total_deaths")?);
        let new_vaccinations = self
            .optional_f64_values("new_vaccinations")?
            .map(&select);
        let stringency_index = self
            .optional_f64_values("stringency_index")?
            .map(&select);

        Ok(CountrySeries {
            country: country.to_string(),
            dates: picked.into_iter().map(|(date, _)| date).collect(),
            new_cases,
            new_deaths,
            new_vaccinations,
            stringency_index,
            total_cases,
            total_deaths,
        })
    }

    fn utf8_values(&self, name: &str) -> Result<Vec<Option<String>>> {
        let col = self
            .df
            .column(name)
            .map_err(|_| ForecastError::DataError(format!("column '{}' not found", name)))?;
        match col.dtype() {
            DataType::Utf8 => Ok(col
                .utf8()
                .unwrap()
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()),
            other => Err(ForecastError::DataError(format!(
                "column '{}' has non-string type {:?}",
                name, other
            ))),
        }
    }

    /// Values of a numeric column, preserving nulls
    fn f64_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let col = self
            .df
            .column(name)
            .map_err(|_| ForecastError::DataError(format!("column '{}' not found", name)))?;
        Self::series_as_f64(col)
    }

    /// Like [`Self::f64_values`], but `Ok(None)` when the column is absent
    fn optional_f64_values(&self, name: &str) -> Result<Option<Vec<Option<f64>>>> {
        if !self.has_column(name) {
            return Ok(None);
        }
        self.f64_values(name).map(Some)
    }

    fn series_as_f64(col: &Series) -> Result<Vec<Option<f64>>> {
        match col.dtype() {
            DataType::Float64 => Ok(col.f64().unwrap().into_iter().collect()),
            DataType::Float32 => Ok(col
                .f32()
                .unwrap()
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            DataType::Int64 => Ok(col
                .i64()
                .unwrap()
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            DataType::Int32 => Ok(col
                .i32()
                .unwrap()
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            DataType::UInt64 => Ok(col
                .u64()
                .unwrap()
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            DataType::UInt32 => Ok(col
                .u32()
                .unwrap()
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            other => Err(ForecastError::DataError(format!(
                "column '{}' has non-numeric type {:?}",
                col.name(),
                other
            ))),
        }
    }

    fn date_values(&self, name: &str) -> Result<Vec<Option<NaiveDate>>> {
        let col = self
            .df
            .column(name)
            .map_err(|_| ForecastError::DataError(format!("column '{}' not found", name)))?;
        match col.dtype() {
            // Schema inference usually leaves ISO dates as strings
            DataType::Utf8 => Ok(col
                .utf8()
                .unwrap()
                .into_iter()
                .map(|v| v.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()))
                .collect()),
            DataType::Date => Ok(col
                .date()
                .unwrap()
                .into_iter()
                .map(|v| {
                    v.and_then(|days| {
                        NaiveDate::from_ymd_opt(1970, 1, 1)
                            .unwrap()
                            .checked_add_days(chrono::Days::new(days as u64))
                    })
                })
                .collect()),
            other => Err(ForecastError::DataError(format!(
                "column '{}' has non-date type {:?}",
                name, other
            ))),
        }
    }
}

/// Date-ordered raw observations for a single country.
///
/// Numeric fields keep their nulls as `None`; the cleaning stage decides how
/// missing values are imputed. Optional columns absent from the dataset are
/// `None` at the vector level.
#[derive(Debug, Clone)]
pub struct CountrySeries {
    /// Country name
    pub country: String,
    /// Observation dates, ascending
    pub dates: Vec<NaiveDate>,
    /// Daily new cases
    pub new_cases: Vec<Option<f64>>,
    /// Daily new deaths
    pub new_deaths: Vec<Option<f64>>,
    /// Daily new vaccinations, when the column exists
    pub new_vaccinations: Option<Vec<Option<f64>>>,
    /// Government stringency index, when the column exists
    pub stringency_index: Option<Vec<Option<f64>>>,
    /// Cumulative cases
    pub total_cases: Vec<Option<f64>>,
    /// Cumulative deaths
    pub total_deaths: Vec<Option<f64>>,
}

impl CountrySeries {
    /// Number of observations
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
