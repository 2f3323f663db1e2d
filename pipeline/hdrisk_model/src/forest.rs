//! Random forest artifacts in array-of-nodes layout.
//!
//! Node `i` of a tree is described by `children_left[i]`,
//! `children_right[i]`, `feature[i]`, `threshold[i]` and `value[i]`.
//! Leaves have both children set to [`LEAF`]. Samples go left when
//! `x[feature] <= threshold`.

use serde::{Deserialize, Serialize};

use crate::classifier::{check_width, Classifier};
use crate::error::{LoadError, ModelError};

pub const LEAF: i32 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i32>,
    pub children_right: Vec<i32>,
    pub feature: Vec<i32>,
    pub threshold: Vec<f64>,
    /// Per-node class weights `[negative, positive]`.
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err(format!("tree node arrays disagree in length (expected {n})"));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {node} has exactly one child"));
                }
                let [neg, pos] = self.value[node];
                if !(neg >= 0.0 && pos >= 0.0 && neg + pos > 0.0) {
                    return Err(format!("leaf {node} has no usable class weights"));
                }
                continue;
            }
            // Children always come after their parent, which also rules out cycles.
            for child in [left, right] {
                if child <= node as i32 || child as usize >= n {
                    return Err(format!("node {node} links to invalid child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {node} splits on unknown feature {feature}"));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {node} has a NaN threshold"));
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf `features` falls into.
    ///
    /// Trees built in code skip load-time validation, so every link is
    /// checked on the way down.
    pub fn leaf_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        let mut node = 0usize;
        loop {
            let (Some(&left), Some(&right)) =
                (self.children_left.get(node), self.children_right.get(node))
            else {
                return Err(malformed(node, "node does not exist"));
            };
            if left == LEAF {
                let [neg, pos] = *self
                    .value
                    .get(node)
                    .ok_or_else(|| malformed(node, "leaf has no class weights"))?;
                let total = neg + pos;
                if !(total > 0.0) {
                    return Err(malformed(node, "leaf has no usable class weights"));
                }
                return Ok([neg / total, pos / total]);
            }

            let x = self
                .feature
                .get(node)
                .and_then(|&f| usize::try_from(f).ok())
                .and_then(|f| features.get(f))
                .ok_or_else(|| malformed(node, "split feature outside the input"))?;
            let threshold = self
                .threshold
                .get(node)
                .ok_or_else(|| malformed(node, "split has no threshold"))?;
            let next = if x <= threshold { left } else { right };
            // Children always come after their parent.
            if next <= node as i32 {
                return Err(malformed(node, "child link does not point forward"));
            }
            node = next as usize;
        }
    }
}

fn malformed(node: usize, reason: &str) -> ModelError {
    ModelError::MalformedTree {
        node,
        reason: reason.to_string(),
    }
}

/// Ensemble of decision trees; probability is the mean of the trees'
/// leaf distributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    #[serde(default)]
    pub name: String,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importances: Option<Vec<f64>>,
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.n_features == 0 {
            return Err(LoadError::invalid(&self.name, "forest declares zero features"));
        }
        if self.trees.is_empty() {
            return Err(LoadError::invalid(&self.name, "forest has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|reason| LoadError::invalid(&self.name, format!("tree {i}: {reason}")))?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        check_width(self.n_features, features)?;
        let mut sum = [0.0, 0.0];
        for tree in &self.trees {
            let [neg, pos] = tree.leaf_proba(features)?;
            sum[0] += neg;
            sum[1] += pos;
        }
        let n = self.trees.len() as f64;
        Ok([sum[0] / n, sum[1] / n])
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }
}
