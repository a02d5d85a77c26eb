//! Trained artifact representations: fitted scaler and regression model

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when an artifact cannot be applied to an input vector.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Input length does not match the artifact's fitted dimensionality.
    #[error("expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A tree references a node index outside its node table.
    #[error("tree {tree} references node {node} out of bounds")]
    CorruptTree { tree: usize, node: usize },
}

/// Fitted per-feature standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    /// Per-feature means observed during fitting
    pub mean: Vec<f64>,
    /// Per-feature scale divisors observed during fitting
    pub scale: Vec<f64>,
}

impl Scaler {
    /// Apply the fitted transform to a raw feature vector.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.mean.len() || self.mean.len() != self.scale.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.mean.len().min(self.scale.len()),
                actual: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

/// One node of a regression tree, indexed within the tree's node table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split: go left when `features[feature] < threshold`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node carrying the tree's output value.
    Leaf { value: f64 },
}

/// A single regression tree, rooted at node 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk the tree for one scaled feature vector.
    fn evaluate(&self, tree_index: usize, features: &[f64]) -> Result<f64, ModelError> {
        let mut node = 0usize;

        // A well-formed tree reaches a leaf in at most `nodes.len()` steps;
        // anything longer means a cycle in the node table.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(node) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).ok_or(ModelError::ShapeMismatch {
                        expected: *feature + 1,
                        actual: features.len(),
                    })?;
                    node = if *value < *threshold { *left } else { *right };
                }
                None => {
                    return Err(ModelError::CorruptTree {
                        tree: tree_index,
                        node,
                    })
                }
            }
        }

        Err(ModelError::CorruptTree {
            tree: tree_index,
            node,
        })
    }
}

/// A trained regression model, deserialized from the model artifact.
///
/// The two variants make the attribution capability explicit: only
/// `Linear` exposes per-feature coefficients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    /// Linear regression: `dot(coefficients, x) + intercept`.
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    /// Additive regression tree ensemble: `base_score + sum(tree outputs)`.
    TreeEnsemble {
        num_features: usize,
        base_score: f64,
        trees: Vec<Tree>,
    },
}

impl Model {
    /// Run the model on a scaled feature vector, producing the raw output.
    pub fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        match self {
            Model::Linear {
                coefficients,
                intercept,
            } => {
                if features.len() != coefficients.len() {
                    return Err(ModelError::ShapeMismatch {
                        expected: coefficients.len(),
                        actual: features.len(),
                    });
                }

                let dot: f64 = coefficients
                    .iter()
                    .zip(features.iter())
                    .map(|(c, x)| c * x)
                    .sum();
                Ok(dot + intercept)
            }
            Model::TreeEnsemble {
                num_features,
                base_score,
                trees,
            } => {
                if features.len() != *num_features {
                    return Err(ModelError::ShapeMismatch {
                        expected: *num_features,
                        actual: features.len(),
                    });
                }

                let mut output = *base_score;
                for (index, tree) in trees.iter().enumerate() {
                    output += tree.evaluate(index, features)?;
                }
                Ok(output)
            }
        }
    }

    /// Per-feature weights, available only for linear models.
    pub fn coefficients(&self) -> Option<&[f64]> {
        match self {
            Model::Linear { coefficients, .. } => Some(coefficients),
            Model::TreeEnsemble { .. } => None,
        }
    }

    /// Additive offset of the model output.
    pub fn intercept(&self) -> f64 {
        match self {
            Model::Linear { intercept, .. } => *intercept,
            Model::TreeEnsemble { base_score, .. } => *base_score,
        }
    }
}

/// The pair of trained artifacts the pipeline runs on.
///
/// Constructed once at startup and shared immutably; either both artifacts
/// are present or the pipeline runs in mock mode without a bundle.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub scaler: Scaler,
    pub model: Model,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_scaler(len: usize) -> Scaler {
        Scaler {
            mean: vec![0.0; len],
            scale: vec![1.0; len],
        }
    }

    #[test]
    fn test_scaler_transform() {
        let scaler = Scaler {
            mean: vec![1.0, 10.0],
            scale: vec![2.0, 5.0],
        };

        let scaled = scaler.transform(&[3.0, 0.0]).unwrap();
        assert_eq!(scaled, vec![1.0, -2.0]);
    }

    #[test]
    fn test_scaler_shape_mismatch() {
        let scaler = identity_scaler(3);
        let err = scaler.transform(&[1.0, 2.0]).unwrap_err();

        match err {
            ModelError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_linear_predict() {
        let model = Model::Linear {
            coefficients: vec![0.5, -1.0, 2.0],
            intercept: 0.25,
        };

        let output = model.predict(&[2.0, 1.0, 0.5]).unwrap();
        assert!((output - 1.25).abs() < 1e-12);
        assert_eq!(model.coefficients().unwrap().len(), 3);
        assert_eq!(model.intercept(), 0.25);
    }

    #[test]
    fn test_tree_ensemble_predict() {
        // Two stumps splitting on feature 0 at 0.0, plus a base score.
        let stump = Tree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: -1.0 },
                TreeNode::Leaf { value: 1.0 },
            ],
        };
        let model = Model::TreeEnsemble {
            num_features: 2,
            base_score: 0.5,
            trees: vec![stump.clone(), stump],
        };

        assert_eq!(model.predict(&[1.0, 0.0]).unwrap(), 2.5);
        assert_eq!(model.predict(&[-1.0, 0.0]).unwrap(), -1.5);
        assert!(model.coefficients().is_none());
    }

    #[test]
    fn test_tree_ensemble_corrupt_node() {
        let model = Model::TreeEnsemble {
            num_features: 1,
            base_score: 0.0,
            trees: vec![Tree {
                nodes: vec![TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 7, // points outside the node table
                    right: 7,
                }],
            }],
        };

        assert!(matches!(
            model.predict(&[1.0]),
            Err(ModelError::CorruptTree { tree: 0, .. })
        ));
    }

    #[test]
    fn test_artifact_json_round_trip() {
        let model = Model::Linear {
            coefficients: vec![0.1, 0.2],
            intercept: 1.0,
        };

        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("\"kind\":\"linear\""));

        let restored: Model = serde_json::from_str(&json).unwrap();
        assert!((restored.predict(&[1.0, 1.0]).unwrap() - 1.3).abs() < 1e-12);
    }
}
