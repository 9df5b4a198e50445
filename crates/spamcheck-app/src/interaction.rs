//! One user interaction: raw text in, outcome out

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::report::{Outcome, Report};
use crate::state::Availability;
use crate::telemetry::{ERRORS_TOTAL, INFERENCE_LATENCY_US, PREDICTIONS_TOTAL, WARNINGS_TOTAL};
use spamcheck_core::InputText;
use std::io::Read;
use tracing::{debug, warn};

/// Exit code when artifacts failed to load
pub const EXIT_LOAD_FAILURE: i32 = 1;

/// Exit code when inference failed
pub const EXIT_INFERENCE_FAILURE: i32 = 2;

/// Validate, classify and format one input
pub async fn evaluate(availability: &Availability, raw: &str) -> Outcome {
    let ready = match availability {
        Availability::Ready(ready) => ready,
        Availability::Unavailable(failure) => {
            metrics::counter!(ERRORS_TOTAL, "kind" => "load").increment(1);
            return Outcome::Unavailable {
                messages: failure.messages(),
            };
        }
    };

    let Some(input) = InputText::parse(raw) else {
        metrics::counter!(WARNINGS_TOTAL).increment(1);
        debug!("Rejected blank input");
        return Outcome::empty_input();
    };

    match ready.classifier.classify(&input).await {
        Ok(result) => {
            let prediction = &result.prediction;
            metrics::counter!(PREDICTIONS_TOTAL, "verdict" => prediction.label.as_str())
                .increment(1);
            metrics::histogram!(INFERENCE_LATENCY_US).record(result.latency_us as f64);
            debug!(
                verdict = %prediction.label,
                spam_probability = prediction.spam_probability,
                matched_features = result.metadata.matched_features,
                latency_us = result.latency_us,
                "Prediction complete"
            );
            Outcome::Prediction(Report::from_prediction(prediction))
        }
        Err(e) => {
            metrics::counter!(ERRORS_TOTAL, "kind" => e.kind()).increment(1);
            warn!(classifier = ready.classifier.name(), "Inference failed: {}", e);
            Outcome::inference_failure(e)
        }
    }
}

/// Process exit code for an outcome
pub fn exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Prediction(_) | Outcome::Warning { .. } => 0,
        Outcome::Error { .. } => EXIT_INFERENCE_FAILURE,
        Outcome::Unavailable { .. } => EXIT_LOAD_FAILURE,
    }
}

/// Terminal interaction; returns the process exit code
pub async fn run_predict(
    config: &AppConfig,
    text: Option<String>,
    format: OutputFormat,
) -> anyhow::Result<i32> {
    let availability = Availability::from_config(config);

    let raw = match text {
        Some(text) => text,
        None if availability.is_ready() => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => String::new(),
    };

    let outcome = evaluate(&availability, &raw).await;
    match format {
        OutputFormat::Text => print!("{}", outcome.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    Ok(exit_code(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use spamcheck_classifiers::{
        ArtifactPaths, ClassificationMetadata, ClassificationResult, Classifier, LoadFailure,
    };
    use spamcheck_core::{Error, Label, PredictionResult, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts calls and returns a fixed ham prediction
    struct CountingClassifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Classifier for CountingClassifier {
        async fn classify(&self, _input: &InputText) -> Result<ClassificationResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ClassificationResult {
                prediction: PredictionResult {
                    spam_probability: 0.2,
                    ham_probability: 0.8,
                    label: Label::Ham,
                    influential_words: None,
                },
                metadata: ClassificationMetadata::default(),
                latency_us: 10,
            })
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn explains(&self) -> bool {
            false
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl Classifier for FailingClassifier {
        async fn classify(&self, _input: &InputText) -> Result<ClassificationResult> {
            Err(Error::inference(
                "X has 3 features, but LogisticRegression is expecting 40 features as input",
            ))
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn explains(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_classifier() {
        let classifier = Arc::new(CountingClassifier {
            calls: AtomicUsize::new(0),
        });
        let availability = Availability::ready(classifier.clone(), 4);

        for raw in ["", "   ", "\n\t "] {
            let outcome = evaluate(&availability, raw).await;
            assert_eq!(outcome, Outcome::empty_input());
            assert_eq!(exit_code(&outcome), 0);
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);

        let outcome = evaluate(&availability, " hello ").await;
        assert!(matches!(outcome, Outcome::Prediction(ref r) if r.verdict == Label::Ham));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_inference_failure_is_reported_and_retryable() {
        let availability = Availability::ready(Arc::new(FailingClassifier), 40);

        for _ in 0..2 {
            let outcome = evaluate(&availability, "Win a prize").await;
            match &outcome {
                Outcome::Error { message } => {
                    assert!(message.starts_with("Oops! Something went wrong: X has 3 features"));
                }
                other => panic!("expected error, got {:?}", other),
            }
            assert_eq!(exit_code(&outcome), EXIT_INFERENCE_FAILURE);
        }
    }

    #[tokio::test]
    async fn test_unavailable_short_circuits() {
        let availability = Availability::Unavailable(LoadFailure {
            paths: ArtifactPaths::default(),
            reason: "io error: not found".to_string(),
        });

        let outcome = evaluate(&availability, "Win a prize").await;
        assert_eq!(
            outcome,
            Outcome::Unavailable {
                messages: vec![
                    "Model loading failed.".to_string(),
                    "Make sure 'model.json' and 'vectorizer.json' are in the app folder."
                        .to_string(),
                ]
            }
        );
        assert_eq!(exit_code(&outcome), EXIT_LOAD_FAILURE);
    }
}
