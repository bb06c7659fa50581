//! The closed set of supported regression model families

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an unrecognized model tag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("model type '{0}' is not supported; available models: linear, random_forest, gradient_boost")]
pub struct UnknownModelKind(pub String);

/// Supported regression model families.
///
/// The set is closed on purpose: unknown tags are rejected when the request
/// is parsed, so the pipeline itself never has to handle an open-ended model
/// identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Linear regression with L2 regularization
    Linear,
    /// Ensemble of bootstrapped decision trees
    RandomForest,
    /// Boosted decision trees
    GradientBoost,
}

/// Catalog entry describing a model family to end users
#[derive(Debug, Clone, Serialize)]
pub struct ModelDescriptor {
    /// Display name
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Situations the model is best suited for
    pub best_for: &'static [&'static str],
}

impl ModelKind {
    /// All supported model kinds, in catalog order
    pub const ALL: [ModelKind; 3] = [
        ModelKind::Linear,
        ModelKind::RandomForest,
        ModelKind::GradientBoost,
    ];

    /// The wire tag for this model kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Linear => "linear",
            ModelKind::RandomForest => "random_forest",
            ModelKind::GradientBoost => "gradient_boost",
        }
    }

    /// Catalog metadata for this model kind
    pub fn descriptor(&self) -> ModelDescriptor {
        match self {
            ModelKind::Linear => ModelDescriptor {
                name: "Linear Regression",
                description: "Simple regularized linear model, fast and interpretable",
                best_for: &["limited data", "linear trends"],
            },
            ModelKind::RandomForest => ModelDescriptor {
                name: "Random Forest",
                description: "Ensemble model robust to outliers",
                best_for: &["complex data", "non-linear relationships"],
            },
            ModelKind::GradientBoost => ModelDescriptor {
                name: "Gradient Boosting",
                description: "Boosted trees with high accuracy",
                best_for: &["accurate predictions", "larger datasets"],
            },
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = UnknownModelKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(ModelKind::Linear),
            "random_forest" => Ok(ModelKind::RandomForest),
            "gradient_boost" => Ok(ModelKind::GradientBoost),
            other => Err(UnknownModelKind(other.to_string())),
        }
    }
}
