//! Feature standardization

/// Zero-mean, unit-variance scaler fit on assembled feature vectors
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and standard deviations
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let n = rows.len() as f64;

        let mut means = vec![0.0; width];
        for row in rows {
            for (j, &v) in row.iter().enumerate() {
                means[j] += v;
            }
        }
        for mean in &mut means {
            *mean /= n.max(1.0);
        }

        let mut stds = vec![0.0; width];
        for row in rows {
            for (j, &v) in row.iter().enumerate() {
                stds[j] += (v - means[j]).powi(2);
            }
        }
        for std in &mut stds {
            *std = (*std / n.max(1.0)).sqrt();
            // Constant columns pass through unscaled.
            if *std <= f64::EPSILON {
                *std = 1.0;
            }
        }

        Self { means, stds }
    }

    /// Standardize a single feature row
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(&v, (&mean, &std))| (v - mean) / std)
            .collect()
    }

    /// Standardize a batch of feature rows
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}
