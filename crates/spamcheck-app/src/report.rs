//! Result formatting shared by the web UI and the terminal

use serde::{Deserialize, Serialize};
use spamcheck_core::{InfluentialWord, Label, PredictionResult};
use std::fmt::Write;

pub const EMPTY_INPUT_WARNING: &str = "Please type something first!";
pub const DETAILS_TITLE: &str = "Why this result?";
pub const INFLUENTIAL_HEADING: &str = "Most influential words:";

const PROGRESS_WIDTH: usize = 30;

/// What one interaction shows the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// A finished prediction
    Prediction(Report),

    /// Input was rejected before inference
    Warning { message: String },

    /// Inference failed; the user may retry
    Error { message: String },

    /// Artifacts failed to load; nothing else works
    Unavailable { messages: Vec<String> },
}

impl Outcome {
    pub fn empty_input() -> Self {
        Self::Warning {
            message: EMPTY_INPUT_WARNING.to_string(),
        }
    }

    pub fn inference_failure(error: impl std::fmt::Display) -> Self {
        Self::Error {
            message: format!("Oops! Something went wrong: {}", error),
        }
    }

    /// Plain-text rendering for the terminal
    pub fn render_text(&self) -> String {
        match self {
            Self::Prediction(report) => report.render_text(),
            Self::Warning { message } | Self::Error { message } => format!("{}\n", message),
            Self::Unavailable { messages } => {
                messages.iter().map(|m| format!("{}\n", m)).collect()
            }
        }
    }
}

/// Display-ready prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Final verdict
    pub verdict: Label,

    /// Verdict line with confidence percentage
    pub headline: String,

    /// Probability of the verdict class
    pub confidence: f64,

    pub spam_probability: f64,
    pub ham_probability: f64,

    /// Progress indicator fill (the spam probability)
    pub progress: f64,

    /// Raw probability lines for the details panel
    pub details: Vec<String>,

    /// Ranked words; `None` when the model has no linear weights
    pub influential_words: Option<Vec<WordLine>>,
}

/// One influential word, with its display line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordLine {
    pub token: String,
    pub label: Label,
    pub weight: f64,
    pub line: String,
}

impl Report {
    pub fn from_prediction(prediction: &PredictionResult) -> Self {
        Self {
            verdict: prediction.label,
            headline: headline(prediction),
            confidence: prediction.confidence(),
            spam_probability: prediction.spam_probability,
            ham_probability: prediction.ham_probability,
            progress: prediction.spam_probability.clamp(0.0, 1.0),
            details: vec![
                format!("Spam: {:.4}", prediction.spam_probability),
                format!("Ham: {:.4}", prediction.ham_probability),
            ],
            influential_words: prediction.influential_words.as_ref().map(|words| {
                words
                    .iter()
                    .map(|w| WordLine {
                        token: w.token.clone(),
                        label: w.label,
                        weight: w.weight,
                        line: word_line(w),
                    })
                    .collect()
            }),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.headline);
        let _ = writeln!(out, "{}", progress_bar(self.progress, PROGRESS_WIDTH));
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", DETAILS_TITLE);
        for line in &self.details {
            let _ = writeln!(out, "  {}", line);
        }
        if let Some(words) = self.influential_words.as_ref().filter(|w| !w.is_empty()) {
            let _ = writeln!(out, "  {}", INFLUENTIAL_HEADING);
            for word in words {
                let _ = writeln!(out, "  {}", word.line);
            }
        }
        out
    }
}

/// Verdict line, e.g. "🚨 Spam detected! Confidence: 97.3%"
pub fn headline(prediction: &PredictionResult) -> String {
    match prediction.label {
        Label::Spam => format!(
            "🚨 Spam detected! Confidence: {:.1}%",
            prediction.spam_probability * 100.0
        ),
        Label::Ham => format!(
            "✅ Not spam. Confidence: {:.1}%",
            prediction.ham_probability * 100.0
        ),
    }
}

/// e.g. "- **free** → spam (score: 3.10)"
pub fn word_line(word: &InfluentialWord) -> String {
    format!(
        "- **{}** → {} (score: {:.2})",
        word.token, word.label, word.weight
    )
}

/// Text progress indicator filled in proportion to `fraction`
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * width as f64).round() as usize;
    format!(
        "[{}{}] {:.1}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        fraction * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spam_prediction() -> PredictionResult {
        PredictionResult {
            spam_probability: 0.97312,
            ham_probability: 0.02688,
            label: Label::Spam,
            influential_words: Some(vec![
                InfluentialWord {
                    token: "free".into(),
                    weight: 3.1,
                    label: Label::Spam,
                },
                InfluentialWord {
                    token: "meeting".into(),
                    weight: -2.404,
                    label: Label::Ham,
                },
            ]),
        }
    }

    #[test]
    fn test_spam_headline() {
        assert_eq!(
            headline(&spam_prediction()),
            "🚨 Spam detected! Confidence: 97.3%"
        );
    }

    #[test]
    fn test_ham_headline_uses_ham_probability() {
        let prediction = PredictionResult {
            spam_probability: 0.1,
            ham_probability: 0.9,
            label: Label::Ham,
            influential_words: None,
        };
        assert_eq!(headline(&prediction), "✅ Not spam. Confidence: 90.0%");
    }

    #[test]
    fn test_report_lines() {
        let report = Report::from_prediction(&spam_prediction());
        assert_eq!(report.details, vec!["Spam: 0.9731", "Ham: 0.0269"]);
        assert_eq!(report.progress, 0.97312);

        let words = report.influential_words.unwrap();
        assert_eq!(words[0].line, "- **free** → spam (score: 3.10)");
        assert_eq!(words[1].line, "- **meeting** → ham (score: -2.40)");
    }

    #[test]
    fn test_text_rendering_skips_empty_word_list() {
        let mut prediction = spam_prediction();
        prediction.influential_words = Some(vec![]);
        let text = Report::from_prediction(&prediction).render_text();
        assert!(text.contains(DETAILS_TITLE));
        assert!(!text.contains(INFLUENTIAL_HEADING));

        let text = Report::from_prediction(&spam_prediction()).render_text();
        assert!(text.contains(INFLUENTIAL_HEADING));
        assert!(text.contains("- **free** → spam (score: 3.10)"));
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[░░░░] 0.0%");
        assert_eq!(progress_bar(1.0, 4), "[████] 100.0%");
        assert_eq!(progress_bar(0.5, 4), "[██░░] 50.0%");
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(Outcome::empty_input()).unwrap();
        assert_eq!(json["kind"], "warning");
        assert_eq!(json["message"], EMPTY_INPUT_WARNING);

        let json = serde_json::to_value(Outcome::Prediction(Report::from_prediction(
            &spam_prediction(),
        )))
        .unwrap();
        assert_eq!(json["kind"], "prediction");
        assert_eq!(json["verdict"], "spam");

        let failure = Outcome::inference_failure("X has 3 features");
        assert_eq!(
            failure.render_text(),
            "Oops! Something went wrong: X has 3 features\n"
        );
    }
}
