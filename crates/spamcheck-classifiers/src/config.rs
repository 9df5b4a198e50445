//! Detector configuration

use serde::{Deserialize, Serialize};
use spamcheck_core::{Error, Result};

/// Tunables applied on top of the loaded artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Class label naming spam in artifacts that declare `classes`
    #[serde(default = "default_spam_label")]
    pub spam_label: String,

    /// Spam probability above which the verdict is spam
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Number of influential words to report
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            spam_label: default_spam_label(),
            threshold: default_threshold(),
            top_k: default_top_k(),
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::config(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.top_k == 0 {
            return Err(Error::config("top_k must be at least 1"));
        }
        if self.spam_label.trim().is_empty() {
            return Err(Error::config("spam_label must not be empty"));
        }
        Ok(())
    }
}

fn default_spam_label() -> String {
    "spam".to_string()
}

fn default_threshold() -> f64 {
    0.5
}

fn default_top_k() -> usize {
    5
}
