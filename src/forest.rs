//! Random forest regressor.
//!
//! # Algorithm
//!
//! Bagged CART regression trees. Each tree is grown on a bootstrap sample
//! by greedily choosing the split that minimises the children's summed
//! squared error, until nodes are pure or hit the size/depth limits.
//! Predictions average the trees.
//!
//! Trees are grown in parallel. Tree `i` draws from its own generator
//! seeded with `seed + i`, so a fit does not depend on the thread count.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::traits::{Regressor, check_training_shape, check_width};

/// Forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestOptions {
    /// Number of trees.
    pub n_estimators: usize,
    /// Maximum tree depth; `None` grows until leaves are pure.
    pub max_depth: Option<usize>,
    /// Minimum samples a node needs to be split.
    pub min_samples_split: usize,
    /// Minimum samples in each child of a split.
    pub min_samples_leaf: usize,
    /// Features considered per split; `None` considers all of them.
    pub max_features: Option<usize>,
    /// Grow each tree on a bootstrap sample instead of the full set.
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestOptions {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Node {
    Leaf(f64),
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    position: usize,
    score: f64,
}

fn sort_by_feature(x: &[Vec<f64>], indices: &mut [usize], feature: usize) {
    indices.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));
}

fn mean(y: &[f64], indices: &[usize]) -> f64 {
    indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64
}

/// Best variance-reducing split of `indices`, or `None` when the node
/// should become a leaf. Reorders `indices`.
fn best_split<R: Rng>(
    x: &[Vec<f64>],
    y: &[f64],
    indices: &mut [usize],
    depth: usize,
    options: &ForestOptions,
    rng: &mut R,
) -> Option<Split> {
    let n = indices.len();
    let min_leaf = options.min_samples_leaf.max(1);
    if n < options.min_samples_split.max(2) || n < 2 * min_leaf {
        return None;
    }
    if options.max_depth.is_some_and(|limit| depth >= limit) {
        return None;
    }
    let first = y[indices[0]];
    if indices.iter().all(|&i| y[i] == first) {
        return None;
    }

    let n_features = x[indices[0]].len();
    let mut features: Vec<usize> = (0..n_features).collect();
    let k = options.max_features.map_or(n_features, |k| k.clamp(1, n_features.max(1)));
    if k < n_features {
        features.shuffle(rng);
        features.truncate(k);
    }

    let total: f64 = indices.iter().map(|&i| y[i]).sum();
    let mut best: Option<Split> = None;

    for &feature in &features {
        sort_by_feature(x, indices, feature);
        let mut left_sum = 0.0;

        for position in 1..n {
            left_sum += y[indices[position - 1]];
            if position < min_leaf || n - position < min_leaf {
                continue;
            }
            let lo = x[indices[position - 1]][feature];
            let hi = x[indices[position]][feature];
            if lo >= hi {
                continue;
            }

            let right_sum = total - left_sum;
            let score = left_sum * left_sum / position as f64
                + right_sum * right_sum / (n - position) as f64;
            if best.is_none_or(|b| score > b.score) {
                let mut threshold = lo + (hi - lo) / 2.0;
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some(Split { feature, threshold, position, score });
            }
        }
    }

    best
}

#[derive(Debug, Clone)]
struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn grow<R: Rng>(
        x: &[Vec<f64>],
        y: &[f64],
        mut indices: Vec<usize>,
        options: &ForestOptions,
        rng: &mut R,
    ) -> Self {
        let mut nodes = vec![Node::Leaf(0.0)];
        // (node, start, end, depth) over `indices`
        let mut pending = vec![(0usize, 0usize, indices.len(), 0usize)];

        while let Some((id, start, end, depth)) = pending.pop() {
            let slice = &mut indices[start..end];
            match best_split(x, y, slice, depth, options, rng) {
                Some(split) => {
                    sort_by_feature(x, slice, split.feature);
                    let left = nodes.len();
                    let right = left + 1;
                    nodes.push(Node::Leaf(0.0));
                    nodes.push(Node::Leaf(0.0));
                    nodes[id] = Node::Split {
                        feature: split.feature,
                        threshold: split.threshold,
                        left,
                        right,
                    };
                    let mid = start + split.position;
                    pending.push((right, mid, end, depth + 1));
                    pending.push((left, start, mid, depth + 1));
                }
                None => nodes[id] = Node::Leaf(mean(y, slice)),
            }
        }

        Self { nodes }
    }

    fn predict(&self, row: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => id = if row[feature] <= threshold { left } else { right },
            }
        }
    }

    fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(0usize, 0usize)];
        while let Some((id, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            if let Node::Split { left, right, .. } = self.nodes[id] {
                pending.push((left, depth + 1));
                pending.push((right, depth + 1));
            }
        }
        deepest
    }
}

/// Ensemble of randomized regression trees.
#[derive(Debug, Clone, Default)]
pub struct RandomForestRegressor {
    options: ForestOptions,
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForestRegressor {
    pub fn new(options: ForestOptions) -> Self {
        Self {
            options,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    pub fn options(&self) -> &ForestOptions {
        &self.options
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Depth of the deepest tree.
    pub fn max_tree_depth(&self) -> usize {
        self.trees.iter().map(RegressionTree::depth).max().unwrap_or(0)
    }
}

impl Regressor for RandomForestRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let width = check_training_shape(features, targets)?;
        if self.options.n_estimators == 0 {
            return Err(PlannerError::Model("forest needs at least one tree".to_string()));
        }

        let options = &self.options;
        let rows = features.len();
        let trees: Vec<RegressionTree> = (0..options.n_estimators)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(options.seed.wrapping_add(i as u64));
                let sample: Vec<usize> = if options.bootstrap {
                    (0..rows).map(|_| rng.gen_range(0..rows)).collect()
                } else {
                    (0..rows).collect()
                };
                RegressionTree::grow(features, targets, sample, options, &mut rng)
            })
            .collect();

        self.trees = trees;
        self.n_features = width;
        debug!(
            trees = self.trees.len(),
            rows,
            max_depth = self.max_tree_depth(),
            "fitted random forest"
        );
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(PlannerError::Model("model is not fitted".to_string()));
        }
        check_width(features, self.n_features)?;

        let n_trees = self.trees.len() as f64;
        Ok(features
            .par_iter()
            .map(|row| self.trees.iter().map(|tree| tree.predict(row)).sum::<f64>() / n_trees)
            .collect())
    }
}
