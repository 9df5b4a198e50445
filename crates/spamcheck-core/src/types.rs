//! Core types for spam predictions

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two classes a spam detector distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Ham => "ham",
        }
    }

    /// The other class
    pub fn opposite(&self) -> Self {
        match self {
            Self::Spam => Self::Ham,
            Self::Ham => Self::Spam,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-entered email text that is known to contain something other than whitespace.
///
/// Constructing one is the only way into inference, so blank input can never
/// reach a vectorizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputText(String);

impl InputText {
    /// Returns `None` for empty or whitespace-only input
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for InputText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A token from the input that contributed to the prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluentialWord {
    /// Vocabulary token
    pub token: String,

    /// Linear model weight for the token
    pub weight: f64,

    /// Class the weight pushes the prediction toward
    pub label: Label,
}

/// Outcome of a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability of the spam class (0.0-1.0)
    pub spam_probability: f64,

    /// Probability of the ham class (0.0-1.0)
    pub ham_probability: f64,

    /// Final verdict
    pub label: Label,

    /// Top contributing tokens; `None` when the model has no linear weights
    pub influential_words: Option<Vec<InfluentialWord>>,
}

impl PredictionResult {
    pub fn is_spam(&self) -> bool {
        self.label == Label::Spam
    }

    /// Probability of the predicted class
    pub fn confidence(&self) -> f64 {
        match self.label {
            Label::Spam => self.spam_probability,
            Label::Ham => self.ham_probability,
        }
    }
}
