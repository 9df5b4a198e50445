//! Fitted probabilistic classifiers
//!
//! Two binary models are supported:
//! - Logistic regression: exposes per-feature coefficients, so predictions can be explained
//! - Multinomial naive Bayes: probabilities only, no coefficients

use crate::sparse::SparseVector;
use serde::{Deserialize, Serialize};
use spamcheck_core::{Error, Result};

/// Serialized classifier (artifact body)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegression),
    MultinomialNb(MultinomialNb),
}

/// Binary logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Class labels in probability column order (optional)
    #[serde(default)]
    pub classes: Vec<String>,

    /// One weight per feature; positive weights push toward the second class
    pub coef: Vec<f64>,

    /// Bias term
    #[serde(default)]
    pub intercept: f64,
}

/// Multinomial naive Bayes over two classes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Class labels in probability column order (optional)
    #[serde(default)]
    pub classes: Vec<String>,

    /// Log prior per class
    pub class_log_prior: Vec<f64>,

    /// Per class, log probability of each feature
    pub feature_log_prob: Vec<Vec<f64>>,
}

impl ClassifierArtifact {
    /// Estimator name, used in messages and metadata
    pub fn name(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "LogisticRegression",
            Self::MultinomialNb(_) => "MultinomialNB",
        }
    }

    /// Declared class labels; empty when the artifact relies on positional order
    pub fn classes(&self) -> &[String] {
        match self {
            Self::LogisticRegression(m) => &m.classes,
            Self::MultinomialNb(m) => &m.classes,
        }
    }

    /// Number of input features the model was fitted on
    pub fn n_features(&self) -> usize {
        match self {
            Self::LogisticRegression(m) => m.coef.len(),
            Self::MultinomialNb(m) => m.feature_log_prob.first().map_or(0, Vec::len),
        }
    }

    /// Linear per-feature weights, when the model has them
    pub fn coefficients(&self) -> Option<&[f64]> {
        match self {
            Self::LogisticRegression(m) => Some(&m.coef),
            Self::MultinomialNb(_) => None,
        }
    }

    /// Check the fitted state is internally consistent
    pub fn validate(&self) -> Result<()> {
        let classes = self.classes();
        if !classes.is_empty() && classes.len() != 2 {
            return Err(Error::artifact(format!(
                "{} declares {} classes; exactly 2 are supported",
                self.name(),
                classes.len()
            )));
        }
        if classes.len() == 2 && classes[0] == classes[1] {
            return Err(Error::artifact(format!(
                "{} declares duplicate class '{}'",
                self.name(),
                classes[0]
            )));
        }

        match self {
            Self::LogisticRegression(m) => {
                if m.coef.is_empty() {
                    return Err(Error::artifact("LogisticRegression has no coefficients"));
                }
                if m.coef.iter().any(|w| !w.is_finite()) || !m.intercept.is_finite() {
                    return Err(Error::artifact("LogisticRegression weights must be finite"));
                }
            }
            Self::MultinomialNb(m) => {
                if m.class_log_prior.len() != 2 || m.feature_log_prob.len() != 2 {
                    return Err(Error::artifact(format!(
                        "MultinomialNB expects 2 classes, got {} priors and {} feature rows",
                        m.class_log_prior.len(),
                        m.feature_log_prob.len()
                    )));
                }
                let n = m.feature_log_prob[0].len();
                if n == 0 || m.feature_log_prob[1].len() != n {
                    return Err(Error::artifact(
                        "MultinomialNB feature rows must be non-empty and of equal length",
                    ));
                }
                if m
                    .feature_log_prob
                    .iter()
                    .flatten()
                    .chain(m.class_log_prior.iter())
                    .any(|w| w.is_nan())
                {
                    return Err(Error::artifact("MultinomialNB log probabilities must not be NaN"));
                }
            }
        }

        Ok(())
    }

    /// Class probabilities for one row, in class column order
    pub fn predict_proba(&self, x: &SparseVector) -> Result<Vec<f64>> {
        let expected = self.n_features();
        if x.dim() != expected {
            return Err(Error::inference(format!(
                "X has {} features, but {} is expecting {} features as input",
                x.dim(),
                self.name(),
                expected
            )));
        }

        let proba = match self {
            Self::LogisticRegression(m) => {
                let positive = sigmoid(x.dot(&m.coef) + m.intercept);
                vec![1.0 - positive, positive]
            }
            Self::MultinomialNb(m) => {
                let jll: Vec<f64> = m
                    .class_log_prior
                    .iter()
                    .zip(&m.feature_log_prob)
                    .map(|(prior, row)| prior + x.dot(row))
                    .collect();
                softmax(&jll)
            }
        };

        if proba.iter().any(|p| !p.is_finite()) {
            return Err(Error::inference(format!(
                "{} produced non-finite probabilities",
                self.name()
            )));
        }

        Ok(proba)
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn softmax(log_values: &[f64]) -> Vec<f64> {
    let max = log_values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = log_values.iter().map(|v| (v - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
