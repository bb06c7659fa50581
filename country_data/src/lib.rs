//! # Country Data
//!
//! Static metadata consumed read-only by the pandemic forecasting pipeline:
//!
//! - The closed set of supported regression model families ([`ModelKind`])
//!   together with a human-readable catalog entry for each.
//! - Per-country configuration ([`CountryProfile`]) driving feature selection
//!   and the recommended model for batch runs.
//!
//! ## Example
//!
//! ```
//! use country_data::{profile_or_default, ModelKind};
//!
//! let profile = profile_or_default("Senegal");
//! assert_eq!(profile.recommended_model, ModelKind::RandomForest);
//!
//! // Countries without a dedicated profile use the default (France) settings.
//! let unknown = profile_or_default("Atlantis");
//! assert!(unknown.seasonal_factor);
//! ```

pub mod models;
pub mod profiles;

pub use crate::models::{ModelDescriptor, ModelKind, UnknownModelKind};
pub use crate::profiles::{
    configured_countries, profile_for, profile_or_default, profiles, Continent, CountryProfile,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
