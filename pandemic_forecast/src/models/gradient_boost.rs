//! Gradient boosted regression trees

use crate::error::Result;
use crate::models::tree::{RegressionTree, TreeConfig};
use crate::models::{check_training_input, FittedRegression, RegressionModel};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Boosted ensemble of shallow regression trees.
///
/// Starts from the target mean and fits each round's tree to the current
/// residuals, shrunk by the learning rate. Trees consider every feature, so
/// the fit is fully deterministic for a given dataset and seed.
#[derive(Debug, Clone)]
pub struct GradientBoostRegressor {
    iterations: usize,
    max_depth: usize,
    learning_rate: f64,
    seed: u64,
}

impl GradientBoostRegressor {
    /// Create a model with explicit hyperparameters
    pub fn new(iterations: usize, max_depth: usize, learning_rate: f64, seed: u64) -> Self {
        Self {
            iterations,
            max_depth,
            learning_rate,
            seed,
        }
    }
}

impl Default for GradientBoostRegressor {
    fn default() -> Self {
        Self::new(100, 6, 0.1, 42)
    }
}

/// Fitted boosted ensemble
#[derive(Debug)]
pub struct FittedGradientBoost {
    base: f64,
    learning_rate: f64,
    trees: Vec<RegressionTree>,
}

impl RegressionModel for GradientBoostRegressor {
    fn fit(&self, rows: &[Vec<f64>], targets: &[f64]) -> Result<Box<dyn FittedRegression>> {
        check_training_input(rows, targets)?;
        let n = rows.len();
        let indices: Vec<usize> = (0..n).collect();

        let config = TreeConfig {
            max_depth: self.max_depth,
            min_samples_split: 2,
            features_per_split: None,
        };

        let base = targets.iter().sum::<f64>() / n as f64;
        let mut predictions = vec![base; n];
        let mut residuals = vec![0.0; n];

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut trees = Vec::with_capacity(self.iterations);

        for _ in 0..self.iterations {
            for i in 0..n {
                residuals[i] = targets[i] - predictions[i];
            }

            let tree = RegressionTree::grow(rows, &residuals, &indices, &config, &mut rng);
            for (i, row) in rows.iter().enumerate() {
                predictions[i] += self.learning_rate * tree.predict_row(row);
            }
            trees.push(tree);
        }

        Ok(Box::new(FittedGradientBoost {
            base,
            learning_rate: self.learning_rate,
            trees,
        }))
    }

    fn name(&self) -> &'static str {
        "gradient_boost"
    }
}

impl FittedRegression for FittedGradientBoost {
    fn predict_row(&self, features: &[f64]) -> f64 {
        let mut prediction = self.base;
        for tree in &self.trees {
            prediction += self.learning_rate * tree.predict_row(features);
        }
        prediction
    }
}
