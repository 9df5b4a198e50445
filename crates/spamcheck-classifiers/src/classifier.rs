//! Classifier trait and common types

use async_trait::async_trait;
use spamcheck_core::{InputText, PredictionResult, Result};

/// Trait for all spam classifiers
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify validated, non-blank input
    async fn classify(&self, input: &InputText) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Whether predictions carry influential words
    fn explains(&self) -> bool;
}

/// Result of classification
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// Probabilities, verdict and explanation
    pub prediction: PredictionResult,

    /// Additional metadata
    pub metadata: ClassificationMetadata,

    /// Latency in microseconds
    pub latency_us: u64,
}

/// Metadata about classification
#[derive(Debug, Clone, Default)]
pub struct ClassificationMetadata {
    /// Model name
    pub model: Option<String>,

    /// All class scores in model column order
    pub all_scores: Option<Vec<(String, f64)>>,

    /// Number of input features present in the vocabulary
    pub matched_features: usize,
}
