//! Static per-country configuration

use crate::models::ModelKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Continent a configured country belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Continent {
    Africa,
    Europe,
    NorthAmerica,
}

/// Static configuration for a country.
///
/// Profiles influence feature selection (seasonality) and the model used by
/// batch runs. Countries without a profile fall back to the France profile
/// for those decisions; they remain fully predictable from the dataset alone.
#[derive(Debug, Clone, Serialize)]
pub struct CountryProfile {
    /// Country name, matching the dataset's location column exactly
    pub name: &'static str,
    /// Continent, used by batch summaries
    pub continent: Continent,
    /// Population density threshold (inhabitants/km²)
    pub population_density_threshold: f64,
    /// Typical GDP per capita range (USD)
    pub gdp_per_capita_range: (f64, f64),
    /// Typical vaccination reporting lag (days)
    pub vaccination_lag_days: u32,
    /// Whether day-of-year seasonal features apply
    pub seasonal_factor: bool,
    /// Model family recommended for this country
    pub recommended_model: ModelKind,
}

const DEFAULT_PROFILE_NAME: &str = "France";

fn build_profiles() -> BTreeMap<&'static str, CountryProfile> {
    let entries = [
        CountryProfile {
            name: "Senegal",
            continent: Continent::Africa,
            population_density_threshold: 83.0,
            gdp_per_capita_range: (1000.0, 2000.0),
            vaccination_lag_days: 30,
            seasonal_factor: true,
            recommended_model: ModelKind::RandomForest,
        },
        CountryProfile {
            name: "Nigeria",
            continent: Continent::Africa,
            population_density_threshold: 226.0,
            gdp_per_capita_range: (2000.0, 2500.0),
            vaccination_lag_days: 28,
            // equatorial climate, no marked respiratory season
            seasonal_factor: false,
            recommended_model: ModelKind::RandomForest,
        },
        CountryProfile {
            name: "South Africa",
            continent: Continent::Africa,
            population_density_threshold: 49.0,
            gdp_per_capita_range: (6000.0, 7000.0),
            vaccination_lag_days: 21,
            seasonal_factor: true,
            recommended_model: ModelKind::GradientBoost,
        },
        CountryProfile {
            name: "Kenya",
            continent: Continent::Africa,
            population_density_threshold: 94.0,
            gdp_per_capita_range: (1800.0, 2200.0),
            vaccination_lag_days: 30,
            seasonal_factor: false,
            recommended_model: ModelKind::RandomForest,
        },
        CountryProfile {
            name: "Morocco",
            continent: Continent::Africa,
            population_density_threshold: 83.0,
            gdp_per_capita_range: (3000.0, 3500.0),
            vaccination_lag_days: 14,
            seasonal_factor: true,
            recommended_model: ModelKind::GradientBoost,
        },
        CountryProfile {
            name: "France",
            continent: Continent::Europe,
            population_density_threshold: 119.0,
            gdp_per_capita_range: (35000.0, 45000.0),
            vaccination_lag_days: 7,
            seasonal_factor: true,
            recommended_model: ModelKind::GradientBoost,
        },
        CountryProfile {
            name: "Germany",
            continent: Continent::Europe,
            population_density_threshold: 240.0,
            gdp_per_capita_range: (45000.0, 55000.0),
            vaccination_lag_days: 5,
            seasonal_factor: true,
            recommended_model: ModelKind::GradientBoost,
        },
        CountryProfile {
            name: "United Kingdom",
            continent: Continent::Europe,
            population_density_threshold: 281.0,
            gdp_per_capita_range: (40000.0, 47000.0),
            vaccination_lag_days: 5,
            seasonal_factor: true,
            recommended_model: ModelKind::GradientBoost,
        },
        CountryProfile {
            name: "United States",
            continent: Continent::NorthAmerica,
            population_density_threshold: 36.0,
            gdp_per_capita_range: (60000.0, 70000.0),
            vaccination_lag_days: 7,
            seasonal_factor: true,
            recommended_model: ModelKind::GradientBoost,
        },
        CountryProfile {
            name: "Canada",
            continent: Continent::NorthAmerica,
            population_density_threshold: 4.0,
            gdp_per_capita_range: (43000.0, 52000.0),
            vaccination_lag_days: 7,
            seasonal_factor: true,
            recommended_model: ModelKind::GradientBoost,
        },
    ];

    entries.into_iter().map(|p| (p.name, p)).collect()
}

/// The full static profile table, keyed by exact country name
pub fn profiles() -> &'static BTreeMap<&'static str, CountryProfile> {
    static PROFILES: OnceLock<BTreeMap<&'static str, CountryProfile>> = OnceLock::new();
    PROFILES.get_or_init(build_profiles)
}

/// Look up the profile for a country, if one is configured
pub fn profile_for(country: &str) -> Option<&'static CountryProfile> {
    profiles().get(country)
}

/// Look up the profile for a country, falling back to the default profile
pub fn profile_or_default(country: &str) -> &'static CountryProfile {
    profile_for(country).unwrap_or_else(|| {
        profiles()
            .get(DEFAULT_PROFILE_NAME)
            .expect("default profile is always configured")
    })
}

/// Names of all configured countries, sorted
pub fn configured_countries() -> Vec<&'static str> {
    profiles().keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_contains_ten_countries() {
        assert_eq!(profiles().len(), 10);
        assert_eq!(configured_countries().len(), 10);
    }

    #[test]
    fn configured_countries_are_sorted() {
        let names = configured_countries();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn unknown_country_uses_france_profile() {
        let profile = profile_or_default("Atlantis");
        assert_eq!(profile.name, "France");
        assert!(profile.seasonal_factor);
        assert_eq!(profile.recommended_model, ModelKind::GradientBoost);
    }

    #[test]
    fn senegal_profile_matches_configuration() {
        let profile = profile_for("Senegal").unwrap();
        assert_eq!(profile.continent, Continent::Africa);
        assert_eq!(profile.population_density_threshold, 83.0);
        assert_eq!(profile.vaccination_lag_days, 30);
        assert_eq!(profile.recommended_model, ModelKind::RandomForest);
    }

    #[test]
    fn african_countries_counted() {
        let african = profiles()
            .values()
            .filter(|p| p.continent == Continent::Africa)
            .count();
        assert_eq!(african, 5);
    }
}
