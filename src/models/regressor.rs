//! Regression model artifacts and their evaluation.
//!
//! Two artifact kinds are understood:
//!
//! - `linear`: `intercept + Σ coefficients[i] · x[i]`
//! - `tree_ensemble`: binary regression trees combined by mean (random forest)
//!   or by sum on top of `base_score` (gradient boosting)
//!
//! Artifacts are plain JSON. Structural checks live in [`Regressor::validate`]
//! and run once at load time. Models built in code may skip that step, so
//! evaluation still treats a bad index or a cycle as a value error.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub n_features: usize,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Average of tree outputs (random forest).
    Mean,
    /// `base_score` plus the sum of tree outputs (gradient boosting).
    Sum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub n_features: usize,
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
}

/// A single tree; node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Samples with `x[feature] <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

impl Regressor {
    pub fn n_features(&self) -> usize {
        match self {
            Regressor::Linear(m) => m.n_features,
            Regressor::TreeEnsemble(m) => m.n_features,
        }
    }

    /// Check the artifact is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Regressor::Linear(m) => m.validate(),
            Regressor::TreeEnsemble(m) => m.validate(),
        }
    }

    /// Predict a single row.
    ///
    /// A row whose width differs from `n_features`, or a non-finite output, is
    /// a value error.
    pub fn predict(&self, row: &[f64]) -> Result<f64, AppError> {
        if row.len() != self.n_features() {
            return Err(AppError::value(format!(
                "X has {} features, but the model is expecting {} features as input.",
                row.len(),
                self.n_features()
            )));
        }
        if let Some(pos) = row.iter().position(|v| !v.is_finite()) {
            return Err(AppError::value(format!(
                "Input contains a non-finite value at feature {pos}."
            )));
        }

        let y = match self {
            Regressor::Linear(m) => m.predict_row(row)?,
            Regressor::TreeEnsemble(m) => m.predict_row(row)?,
        };

        if !y.is_finite() {
            return Err(AppError::value("Model produced a non-finite prediction."));
        }
        Ok(y)
    }
}

impl LinearRegressor {
    fn validate(&self) -> Result<(), String> {
        if self.coefficients.len() != self.n_features {
            return Err(format!(
                "linear model declares {} features but has {} coefficients",
                self.n_features,
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("linear model has non-finite parameters".to_string());
        }
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64, AppError> {
        if self.coefficients.len() != row.len() {
            return Err(AppError::value(format!(
                "linear model has {} coefficients for {} features",
                self.coefficients.len(),
                row.len()
            )));
        }
        let coef = DVector::from_column_slice(&self.coefficients);
        let x = DVector::from_column_slice(row);
        Ok(self.intercept + coef.dot(&x))
    }
}

impl TreeEnsemble {
    fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("tree ensemble has no trees".to_string());
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| format!("tree {t}: {e}"))?;
        }
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64, AppError> {
        if self.trees.is_empty() {
            return Err(AppError::value("tree ensemble has no trees"));
        }
        let mut total = 0.0;
        for (t, tree) in self.trees.iter().enumerate() {
            total += tree
                .predict_row(row)
                .map_err(|e| AppError::value(format!("tree {t}: {}", e.message())))?;
        }
        Ok(match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => self.base_score + total,
        })
    }
}

impl RegressionTree {
    /// Children must point strictly forward, which also rules out cycles.
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("empty tree".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!("node {idx} splits on feature {feature}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {idx} has invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {idx} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. A path longer than the node count means
    /// the tree has a cycle.
    fn predict_row(&self, row: &[f64]) -> Result<f64, AppError> {
        let mut idx = 0usize;
        for _ in 0..self.nodes.len() {
            let node = self
                .nodes
                .get(idx)
                .ok_or_else(|| AppError::value(format!("node {idx} does not exist")))?;
            match *node {
                TreeNode::Leaf { value } => return Ok(value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = row.get(feature).ok_or_else(|| {
                        AppError::value(format!(
                            "node {idx} splits on feature {feature}, but the row has {} features",
                            row.len()
                        ))
                    })?;
                    idx = if *x <= threshold { left } else { right };
                }
            }
        }
        Err(AppError::value(format!(
            "tree does not reach a leaf within {} nodes",
            self.nodes.len()
        )))
    }
}
