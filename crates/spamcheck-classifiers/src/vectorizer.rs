//! Text vectorizer: raw text to bag-of-words / tf-idf features
//!
//! The fitted state mirrors what a scikit-learn `CountVectorizer` or
//! `TfidfVectorizer` holds after `fit`, so exported vocabularies and idf
//! weights reproduce the same feature space.

use crate::sparse::SparseVector;
use regex::Regex;
use serde::{Deserialize, Serialize};
use spamcheck_core::{Error, Result};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Default token pattern: words of two or more word characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Weighting applied to raw term counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorizerKind {
    /// Raw (or binary) term counts
    #[default]
    Count,
    /// Term counts scaled by inverse document frequency
    Tfidf,
}

/// Row normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized vectorizer state (artifact body)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerSpec {
    /// Weighting scheme
    #[serde(default)]
    pub kind: VectorizerKind,

    /// Token (or n-gram) to column index
    pub vocabulary: HashMap<String, usize>,

    /// Lowercase text before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Regex selecting tokens
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Inclusive n-gram bounds
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Tokens dropped before n-grams are formed
    #[serde(default)]
    pub stop_words: Vec<String>,

    /// Clamp counts to 1
    #[serde(default)]
    pub binary: bool,

    /// Per-column idf weights (tf-idf only)
    #[serde(default)]
    pub idf: Vec<f64>,

    /// Row normalization (tf-idf only)
    #[serde(default)]
    pub norm: Option<Norm>,

    /// Replace tf with 1 + ln(tf) (tf-idf only)
    #[serde(default)]
    pub sublinear_tf: bool,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// A fitted, ready-to-use vectorizer
#[derive(Debug, Clone)]
pub struct TextVectorizer {
    spec: VectorizerSpec,
    token_regex: Regex,
    stop_words: HashSet<String>,
    feature_names: Vec<String>,
}

impl TextVectorizer {
    /// Validate a spec and compile its tokenizer
    pub fn from_spec(spec: VectorizerSpec) -> Result<Self> {
        let n_features = spec.vocabulary.len();
        if n_features == 0 {
            return Err(Error::artifact("vectorizer vocabulary is empty"));
        }

        let mut feature_names = vec![String::new(); n_features];
        let mut seen = vec![false; n_features];
        for (token, &index) in &spec.vocabulary {
            if index >= n_features {
                return Err(Error::artifact(format!(
                    "vocabulary index {} for '{}' is out of range for {} features",
                    index, token, n_features
                )));
            }
            if seen[index] {
                return Err(Error::artifact(format!(
                    "vocabulary index {} is assigned to more than one token",
                    index
                )));
            }
            seen[index] = true;
            feature_names[index] = token.clone();
        }

        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::artifact(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        if spec.kind == VectorizerKind::Tfidf {
            if spec.idf.len() != n_features {
                return Err(Error::artifact(format!(
                    "idf has {} weights but vocabulary has {} features",
                    spec.idf.len(),
                    n_features
                )));
            }
            if spec.idf.iter().any(|w| !w.is_finite()) {
                return Err(Error::artifact("idf weights must be finite"));
            }
        }

        let token_regex = Regex::new(&spec.token_pattern).map_err(|e| {
            Error::artifact(format!("invalid token_pattern '{}': {}", spec.token_pattern, e))
        })?;

        let stop_words = spec.stop_words.iter().cloned().collect();

        Ok(Self {
            spec,
            token_regex,
            stop_words,
            feature_names,
        })
    }

    /// Number of output columns
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Tokens ordered by column index
    pub fn feature_names_out(&self) -> &[String] {
        &self.feature_names
    }

    pub fn kind(&self) -> VectorizerKind {
        self.spec.kind
    }

    /// Split text into the n-grams the vocabulary is keyed by
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.spec.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_regex
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.spec.ngram_range;
        if min_n == 1 && max_n == 1 {
            return tokens.into_iter().map(str::to_string).collect();
        }

        let mut grams = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                grams.push(window.join(" "));
            }
        }
        grams
    }

    /// Map text into the fitted feature space
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in self.analyze(text) {
            if let Some(&index) = self.spec.vocabulary.get(&gram) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector::from_entries(self.n_features(), counts);

        if self.spec.binary {
            vector.map_values(|_, _| 1.0);
        }

        if self.spec.kind == VectorizerKind::Tfidf {
            let sublinear = self.spec.sublinear_tf;
            let idf = &self.spec.idf;
            vector.map_values(|i, tf| {
                let tf = if sublinear { 1.0 + tf.ln() } else { tf };
                tf * idf[i]
            });

            match self.spec.norm {
                Some(Norm::L2) => vector.normalize_l2(),
                Some(Norm::L1) => vector.normalize_l1(),
                None => {}
            }
        }

        vector
    }
}
