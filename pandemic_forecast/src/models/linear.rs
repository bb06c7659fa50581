//! L2-regularized linear regression

use crate::error::Result;
use crate::models::{check_training_input, FittedRegression, RegressionModel};
use crate::scaling::StandardScaler;

/// Linear regression with L2 regularization, fit by full-batch gradient
/// descent.
///
/// Features and targets are standardized internally before descent so the
/// fixed learning rate is well-conditioned regardless of the input scale;
/// predictions are mapped back to the original target scale.
#[derive(Debug, Clone)]
pub struct RidgeRegression {
    max_iter: usize,
    reg_param: f64,
    learning_rate: f64,
}

impl RidgeRegression {
    /// Create a model with explicit hyperparameters
    pub fn new(max_iter: usize, reg_param: f64, learning_rate: f64) -> Self {
        Self {
            max_iter,
            reg_param,
            learning_rate,
        }
    }
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self::new(100, 0.01, 0.1)
    }
}

/// Fitted ridge model
#[derive(Debug)]
pub struct FittedRidge {
    weights: Vec<f64>,
    bias: f64,
    feature_scaler: StandardScaler,
    target_mean: f64,
    target_std: f64,
}

impl RegressionModel for RidgeRegression {
    fn fit(&self, rows: &[Vec<f64>], targets: &[f64]) -> Result<Box<dyn FittedRegression>> {
        let width = check_training_input(rows, targets)?;
        let n = rows.len() as f64;

        let feature_scaler = StandardScaler::fit(rows);
        let x = feature_scaler.transform(rows);

        let target_mean = targets.iter().sum::<f64>() / n;
        let target_std = {
            let var = targets
                .iter()
                .map(|&t| (t - target_mean).powi(2))
                .sum::<f64>()
                / n;
            let std = var.sqrt();
            if std <= f64::EPSILON {
                1.0
            } else {
                std
            }
        };
        let y: Vec<f64> = targets
            .iter()
            .map(|&t| (t - target_mean) / target_std)
            .collect();

        let mut weights = vec![0.0; width];
        let mut bias = 0.0;

        for _ in 0..self.max_iter {
            let mut weight_grads = vec![0.0; width];
            let mut bias_grad = 0.0;

            for (row, &target) in x.iter().zip(y.iter()) {
                let residual = dot(&weights, row) + bias - target;
                for (grad, &feature) in weight_grads.iter_mut().zip(row.iter()) {
                    *grad += residual * feature;
                }
                bias_grad += residual;
            }

            for (weight, grad) in weights.iter_mut().zip(weight_grads.iter()) {
                // L2 penalty applies to weights only, not the intercept.
                *weight -= self.learning_rate * (grad / n + self.reg_param * *weight);
            }
            bias -= self.learning_rate * bias_grad / n;
        }

        Ok(Box::new(FittedRidge {
            weights,
            bias,
            feature_scaler,
            target_mean,
            target_std,
        }))
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

impl FittedRegression for FittedRidge {
    fn predict_row(&self, features: &[f64]) -> f64 {
        let scaled = self.feature_scaler.transform_row(features);
        let standardized = dot(&self.weights, &scaled) + self.bias;
        standardized * self.target_std + self.target_mean
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_a_linear_relationship() {
        let rows: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..40).map(|i| 3.0 + 2.0 * i as f64).collect();

        let model = RidgeRegression::default();
        let fitted = model.fit(&rows, &targets).unwrap();

        let prediction = fitted.predict_row(&[20.0]);
        assert!((prediction - 43.0).abs() < 2.0, "got {}", prediction);
    }

    #[test]
    fn rejects_mismatched_input() {
        let model = RidgeRegression::default();
        assert!(model.fit(&[vec![1.0]], &[1.0, 2.0]).is_err());
        assert!(model.fit(&[], &[]).is_err());
    }
}
