//! CART regression trees shared by the ensemble models

use rand::rngs::StdRng;

/// Tree-growing parameters
#[derive(Debug, Clone)]
pub(crate) struct TreeConfig {
    /// Maximum tree depth
    pub max_depth: usize,
    /// Nodes smaller than this become leaves
    pub min_samples_split: usize,
    /// Number of features considered per split; `None` considers all
    pub features_per_split: Option<usize>,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted regression tree.
///
/// Splits minimize the summed squared error of the child partitions. Split
/// search is deterministic: features are scanned in ascending index order,
/// candidate thresholds in ascending value order, and ties keep the first
/// best. Randomness enters only through the sampled feature subset, driven
/// by the caller's seeded generator.
#[derive(Debug, Clone)]
pub(crate) struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Grow a tree over the rows selected by `indices`
    pub fn grow(
        rows: &[Vec<f64>],
        targets: &[f64],
        indices: &[usize],
        config: &TreeConfig,
        rng: &mut StdRng,
    ) -> Self {
        let mut nodes = Vec::new();
        build_node(&mut nodes, rows, targets, indices, 0, config, rng);
        Self { nodes }
    }

    /// Predict the target for one feature row
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

fn build_node(
    nodes: &mut Vec<Node>,
    rows: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    depth: usize,
    config: &TreeConfig,
    rng: &mut StdRng,
) -> usize {
    let mean = node_mean(targets, indices);
    let sse = node_sse(targets, indices, mean);

    if depth >= config.max_depth || indices.len() < config.min_samples_split || sse <= f64::EPSILON
    {
        nodes.push(Node::Leaf { value: mean });
        return nodes.len() - 1;
    }

    let width = rows[0].len();
    let candidates = candidate_features(width, config.features_per_split, rng);

    let split = match best_split(rows, targets, indices, &candidates, sse) {
        Some(split) => split,
        None => {
            nodes.push(Node::Leaf { value: mean });
            return nodes.len() - 1;
        }
    };

    let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| rows[i][split.feature] <= split.threshold);

    // Reserve this node's slot before recursing so the root stays at 0.
    let slot = nodes.len();
    nodes.push(Node::Leaf { value: mean });

    let left = build_node(nodes, rows, targets, &left_indices, depth + 1, config, rng);
    let right = build_node(nodes, rows, targets, &right_indices, depth + 1, config, rng);

    nodes[slot] = Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left,
        right,
    };
    slot
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    sse: f64,
}

fn best_split(
    rows: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    candidate_features: &[usize],
    parent_sse: f64,
) -> Option<SplitCandidate> {
    let n = indices.len();
    let mut best: Option<SplitCandidate> = None;

    for &feature in candidate_features {
        let mut pairs: Vec<(f64, f64)> = indices
            .iter()
            .map(|&i| (rows[i][feature], targets[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        let total_sum: f64 = pairs.iter().map(|(_, t)| t).sum();
        let total_sq: f64 = pairs.iter().map(|(_, t)| t * t).sum();

        for k in 1..n {
            let (value, target) = pairs[k - 1];
            left_sum += target;
            left_sq += target * target;

            // No threshold separates equal feature values.
            if value == pairs[k].0 {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let left_n = k as f64;
            let right_n = (n - k) as f64;

            let sse =
                (left_sq - left_sum * left_sum / left_n) + (right_sq - right_sum * right_sum / right_n);

            if sse < parent_sse && best.as_ref().map(|b| sse < b.sse).unwrap_or(true) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (value + pairs[k].0) / 2.0,
                    sse,
                });
            }
        }
    }

    best
}

fn candidate_features(
    width: usize,
    features_per_split: Option<usize>,
    rng: &mut StdRng,
) -> Vec<usize> {
    match features_per_split {
        Some(k) if k < width => {
            let mut sampled: Vec<usize> = rand::seq::index::sample(rng, width, k).into_vec();
            sampled.sort_unstable();
            sampled
        }
        _ => (0..width).collect(),
    }
}

fn node_mean(targets: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64
}

fn node_sse(targets: &[f64], indices: &[usize], mean: f64) -> f64 {
    indices.iter().map(|&i| (targets[i] - mean).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn splits_a_step_function_exactly() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..10).map(|i| if i < 5 { 1.0 } else { 9.0 }).collect();
        let indices: Vec<usize> = (0..10).collect();

        let config = TreeConfig {
            max_depth: 2,
            min_samples_split: 2,
            features_per_split: None,
        };
        let mut rng = StdRng::seed_from_u64(42);
        let tree = RegressionTree::grow(&rows, &targets, &indices, &config, &mut rng);

        assert_eq!(tree.predict_row(&[2.0]), 1.0);
        assert_eq!(tree.predict_row(&[7.0]), 9.0);
    }

    #[test]
    fn constant_targets_collapse_to_a_leaf() {
        let rows: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64]).collect();
        let targets = vec![4.0; 6];
        let indices: Vec<usize> = (0..6).collect();

        let config = TreeConfig {
            max_depth: 5,
            min_samples_split: 2,
            features_per_split: None,
        };
        let mut rng = StdRng::seed_from_u64(42);
        let tree = RegressionTree::grow(&rows, &targets, &indices, &config, &mut rng);

        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.predict_row(&[3.0]), 4.0);
    }
}
