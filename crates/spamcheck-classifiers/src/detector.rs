//! Spam detector: vectorize, predict, explain

use crate::artifact::Artifacts;
use crate::classifier::{ClassificationMetadata, ClassificationResult, Classifier};
use crate::config::DetectorConfig;
use crate::explain::influential_words;
use crate::sparse::SparseVector;
use spamcheck_core::{Error, InputText, Label, PredictionResult, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Which probability column holds which class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassLayout {
    /// Column of the spam probability
    pub spam: usize,

    /// Column of the ham probability
    pub ham: usize,

    /// Class a positive linear weight pushes toward
    pub positive: Label,
}

impl ClassLayout {
    /// Spam in column 0, ham in column 1, positive weights read as spam
    pub const POSITIONAL: ClassLayout = ClassLayout {
        spam: 0,
        ham: 1,
        positive: Label::Spam,
    };

    /// Resolve the layout from the model's declared classes.
    ///
    /// Without declared classes the positional convention applies.
    pub fn resolve(classes: &[String], spam_label: &str) -> Result<Self> {
        if classes.is_empty() {
            return Ok(Self::POSITIONAL);
        }
        if classes.len() != 2 {
            return Err(Error::artifact(format!(
                "expected 2 model classes, got {}",
                classes.len()
            )));
        }

        let spam = classes
            .iter()
            .position(|c| c == spam_label)
            .ok_or_else(|| {
                Error::artifact(format!(
                    "model classes {:?} do not contain the spam label '{}'",
                    classes, spam_label
                ))
            })?;

        Ok(Self {
            spam,
            ham: 1 - spam,
            positive: if spam == 1 { Label::Spam } else { Label::Ham },
        })
    }
}

/// Spam detector over a loaded model and vectorizer
pub struct SpamDetector {
    artifacts: Arc<Artifacts>,
    layout: ClassLayout,
    config: DetectorConfig,
}

impl SpamDetector {
    /// Create a detector, resolving the class layout up front
    pub fn new(artifacts: Arc<Artifacts>, config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        let layout = ClassLayout::resolve(artifacts.model.classes(), &config.spam_label)?;
        debug!(?layout, model = artifacts.model.name(), "Resolved class layout");

        Ok(Self {
            artifacts,
            layout,
            config,
        })
    }

    pub fn layout(&self) -> ClassLayout {
        self.layout
    }

    pub fn artifacts(&self) -> &Arc<Artifacts> {
        &self.artifacts
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Map input text into the model's feature space
    pub fn vectorize(&self, input: &InputText) -> SparseVector {
        self.artifacts.vectorizer.transform(input.as_str())
    }

    /// Run one prediction
    pub fn predict(&self, input: &InputText) -> Result<PredictionResult> {
        let vector = self.vectorize(input);
        self.predict_vector(&vector)
    }

    fn predict_vector(&self, vector: &SparseVector) -> Result<PredictionResult> {
        let model = &self.artifacts.model;
        let proba = model.predict_proba(vector)?;

        let column = |i: usize| {
            proba.get(i).copied().ok_or_else(|| {
                Error::inference(format!(
                    "{} returned {} probabilities; expected 2",
                    model.name(),
                    proba.len()
                ))
            })
        };
        let spam_probability = column(self.layout.spam)?;
        let ham_probability = column(self.layout.ham)?;

        let label = if spam_probability > self.config.threshold {
            Label::Spam
        } else {
            Label::Ham
        };

        let influential_words = model.coefficients().map(|coefficients| {
            influential_words(
                vector,
                self.artifacts.vectorizer.feature_names_out(),
                coefficients,
                self.layout.positive,
                self.config.top_k,
            )
        });

        Ok(PredictionResult {
            spam_probability,
            ham_probability,
            label,
            influential_words,
        })
    }

    fn column_names(&self) -> Vec<String> {
        let classes = self.artifacts.model.classes();
        if classes.is_empty() {
            let mut names = vec![String::new(); 2];
            names[self.layout.spam] = Label::Spam.to_string();
            names[self.layout.ham] = Label::Ham.to_string();
            names
        } else {
            classes.to_vec()
        }
    }
}

#[async_trait::async_trait]
impl Classifier for SpamDetector {
    async fn classify(&self, input: &InputText) -> Result<ClassificationResult> {
        let start = Instant::now();

        let vector = self.vectorize(input);
        let prediction = self.predict_vector(&vector)?;

        let mut scores = vec![0.0; 2];
        scores[self.layout.spam] = prediction.spam_probability;
        scores[self.layout.ham] = prediction.ham_probability;

        Ok(ClassificationResult {
            prediction,
            metadata: ClassificationMetadata {
                model: Some(self.artifacts.model.name().to_string()),
                all_scores: Some(self.column_names().into_iter().zip(scores).collect()),
                matched_features: vector.nonzero().count(),
            },
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        self.artifacts.model.name()
    }

    fn explains(&self) -> bool {
        self.artifacts.model.coefficients().is_some()
    }
}
