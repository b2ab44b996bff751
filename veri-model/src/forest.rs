//! Bagged decision-tree ensemble.
//!
//! Axis-aligned trees grown by Gini impurity on bootstrap resamples, with
//! a random feature subset considered at each split. Class probabilities
//! are the average of the per-tree leaf distributions.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Configuration for the ensemble.
///
/// # Example
///
/// ```
/// use veri_model::ForestConfig;
///
/// let config = ForestConfig::default();
/// assert_eq!(config.trees, 100);
/// assert_eq!(config.seed, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub trees: usize,

    /// Maximum tree depth.
    pub max_depth: usize,

    /// Minimum samples required to consider a split.
    pub min_samples_split: usize,

    /// Seed for bootstrap resampling and feature subsets.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: 12,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl ForestConfig {
    /// Creates a configuration with the given tree count.
    #[must_use]
    pub const fn new(trees: usize) -> Self {
        Self {
            trees,
            max_depth: 12,
            min_samples_split: 2,
            seed: 42,
        }
    }

    /// Sets the maximum depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.trees > 0 && self.max_depth > 0 && self.min_samples_split >= 2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        probs: [f32; 2],
    },
}

/// One axis-aligned decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    root: usize,
}

impl DecisionTree {
    /// Grows a tree over the given sample indices.
    fn fit(
        rows: &[Vec<f32>],
        labels: &[usize],
        indices: &[usize],
        config: &ForestConfig,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let mut nodes = Vec::new();
        let root = grow(rows, labels, indices, 0, config, rng, &mut nodes);
        Self { nodes, root }
    }

    /// Class probabilities `[real, fake]` for one descriptor.
    #[must_use]
    pub fn predict_proba(&self, features: &[f32]) -> [f32; 2] {
        let mut index = self.root;
        loop {
            match &self.nodes[index] {
                Node::Leaf { probs } => return *probs,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// A fitted ensemble of decision trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    trees: Vec<DecisionTree>,
}

impl Forest {
    /// Fits the ensemble on a feature matrix.
    ///
    /// `labels` holds class indices (0 real, 1 fake) aligned with `rows`.
    /// Each tree sees a bootstrap resample of the rows; resampling and
    /// feature subsets derive from `config.seed`, so fitting is
    /// reproducible.
    #[must_use]
    pub fn fit(rows: &[Vec<f32>], labels: &[usize], config: &ForestConfig) -> Self {
        if rows.is_empty() {
            return Self { trees: Vec::new() };
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let n = rows.len();

        let trees = (0..config.trees)
            .map(|_| {
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(rows, labels, &bootstrap, config, &mut rng)
            })
            .collect();

        Self { trees }
    }

    /// Averaged class probabilities `[real, fake]` for one descriptor.
    ///
    /// An empty ensemble reports an even split.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn predict_proba(&self, features: &[f32]) -> [f32; 2] {
        if self.trees.is_empty() {
            return [0.5, 0.5];
        }

        let mut sums = [0.0_f32; 2];
        for tree in &self.trees {
            let probs = tree.predict_proba(features);
            sums[0] += probs[0];
            sums[1] += probs[1];
        }

        let count = self.trees.len() as f32;
        [sums[0] / count, sums[1] / count]
    }

    /// Number of trees in the ensemble.
    #[must_use]
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

#[allow(clippy::cast_precision_loss)]
fn gini(counts: [usize; 2]) -> f64 {
    let total = (counts[0] + counts[1]) as f64;
    if total <= 0.0 {
        return 0.0;
    }
    let p0 = counts[0] as f64 / total;
    let p1 = counts[1] as f64 / total;
    p1.mul_add(-p1, p0.mul_add(-p0, 1.0))
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grow(
    rows: &[Vec<f32>],
    labels: &[usize],
    indices: &[usize],
    depth: usize,
    config: &ForestConfig,
    rng: &mut ChaCha8Rng,
    nodes: &mut Vec<Node>,
) -> usize {
    let mut counts = [0_usize; 2];
    for &i in indices {
        counts[labels[i].min(1)] += 1;
    }
    let total = indices.len();

    let make_leaf = |nodes: &mut Vec<Node>| {
        let probs = if total == 0 {
            [0.5, 0.5]
        } else {
            [
                counts[0] as f32 / total as f32,
                counts[1] as f32 / total as f32,
            ]
        };
        nodes.push(Node::Leaf { probs });
        nodes.len() - 1
    };

    let pure = counts[0] == 0 || counts[1] == 0;
    if pure || depth >= config.max_depth || total < config.min_samples_split {
        return make_leaf(nodes);
    }

    let n_features = rows[indices[0]].len();
    let subset_size = ((n_features as f64).sqrt().ceil() as usize).clamp(1, n_features);
    let candidates = rand::seq::index::sample(rng, n_features, subset_size);

    let parent_gini = gini(counts);
    let mut best: Option<(usize, f32)> = None;
    let mut best_impurity = parent_gini;

    for feature in candidates {
        let mut ordered: Vec<(f32, usize)> = indices
            .iter()
            .map(|&i| (rows[i][feature], labels[i].min(1)))
            .collect();
        ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left = [0_usize; 2];
        let mut right = counts;
        for i in 1..total {
            let (prev_value, prev_label) = ordered[i - 1];
            left[prev_label] += 1;
            right[prev_label] -= 1;

            if ordered[i].0 <= prev_value {
                continue;
            }

            let impurity =
                (i as f64).mul_add(gini(left), ((total - i) as f64) * gini(right)) / total as f64;
            if impurity + 1e-12 < best_impurity {
                best_impurity = impurity;
                best = Some((feature, (prev_value + ordered[i].0) / 2.0));
            }
        }
    }

    let Some((feature, threshold)) = best else {
        return make_leaf(nodes);
    };

    let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| rows[i][feature] <= threshold);

    let left = grow(rows, labels, &left_indices, depth + 1, config, rng, nodes);
    let right = grow(rows, labels, &right_indices, depth + 1, config, rng, nodes);

    nodes.push(Node::Split {
        feature,
        threshold,
        left,
        right,
    });
    nodes.len() - 1
}
