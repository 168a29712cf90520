//! Decision tree estimator (flat node array, root at index 0).

use serde::Deserialize;

use crate::error::{IrisError, Result};
use crate::model::{Classifier, Features, N_FEATURES};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go `left` when `x[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: i64,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self> {
        let tree = Self { nodes };
        tree.validate()?;
        Ok(tree)
    }

    /// Scalar checks only. Child links are resolved during traversal.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(IrisError::Load("decision tree has no nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split { feature, threshold, .. } = node {
                if *feature >= N_FEATURES {
                    return Err(IrisError::Load(format!(
                        "node {i}: feature index {feature} out of range"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(IrisError::Load(format!("node {i}: threshold is not finite")));
                }
            }
        }
        Ok(())
    }
}

impl Classifier for DecisionTree {
    fn classify(&self, features: &Features) -> Result<i64> {
        let mut idx = 0usize;
        // A well-formed tree reaches a leaf in fewer hops than it has nodes.
        for _ in 0..self.nodes.len() {
            let node = self.nodes.get(idx).ok_or_else(|| {
                IrisError::Inference(format!(
                    "node index {idx} out of range (tree has {} nodes)",
                    self.nodes.len()
                ))
            })?;
            match node {
                TreeNode::Leaf { class } => return Ok(*class),
                TreeNode::Split { feature, threshold, left, right } => {
                    let x = features.get(*feature).ok_or_else(|| {
                        IrisError::Inference(format!("node {idx}: feature index {feature} out of range"))
                    })?;
                    idx = if *x <= *threshold { *left } else { *right };
                }
            }
        }
        Err(IrisError::Inference(format!(
            "tree traversal exceeded {} steps; node links form a cycle",
            self.nodes.len()
        )))
    }
}
