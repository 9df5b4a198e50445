use crate::config::AppConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use spamcheck_classifiers::{ArtifactLoader, ArtifactState, Classifier, LoadFailure, SpamDetector};
use std::sync::Arc;

/// Whether the detector can serve predictions
#[derive(Clone)]
pub enum Availability {
    /// Artifacts loaded; all interactions go to this classifier
    Ready(Ready),

    /// Loading failed; the interface is inert until restart
    Unavailable(LoadFailure),
}

/// A loaded classifier and what it was loaded with
#[derive(Clone)]
pub struct Ready {
    pub classifier: Arc<dyn Classifier>,

    /// Vectorizer output dimension
    pub features: usize,
}

impl Availability {
    pub fn ready(classifier: Arc<dyn Classifier>, features: usize) -> Self {
        Self::Ready(Ready {
            classifier,
            features,
        })
    }

    /// Resolve the loader's one-time result into a detector
    pub fn from_loader(loader: &ArtifactLoader, config: &AppConfig) -> Self {
        let artifacts = match loader.load() {
            ArtifactState::Loaded(artifacts) => Arc::clone(artifacts),
            ArtifactState::Failed(failure) => return Self::Unavailable(failure.clone()),
        };

        let features = artifacts.vectorizer.n_features();
        match SpamDetector::new(artifacts, config.detector.clone()) {
            Ok(detector) => Self::ready(Arc::new(detector), features),
            Err(e) => {
                tracing::error!("Model loading failed: {}", e);
                Self::Unavailable(LoadFailure {
                    paths: loader.paths().clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let loader = ArtifactLoader::new(config.artifact_paths());
        Self::from_loader(&loader, config)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable(failure) => Some(failure),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,

    /// Computed once at startup
    pub availability: Arc<Availability>,

    /// Prometheus render handle; `None` when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: AppConfig, availability: Availability) -> Self {
        Self {
            config: Arc::new(config),
            availability: Arc::new(availability),
            metrics: None,
        }
    }

    /// Load the artifacts named by `config`
    pub fn load(config: AppConfig) -> Self {
        let availability = Availability::from_config(&config);
        Self::new(config, availability)
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn demo_config() -> AppConfig {
        let models = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");
        AppConfig {
            model_path: models.join("model.json"),
            vectorizer_path: models.join("vectorizer.json"),
            ..Default::default()
        }
    }

    #[test]
    fn test_demo_artifacts_are_ready() {
        let availability = Availability::from_config(&demo_config());
        assert!(availability.is_ready());
        match availability {
            Availability::Ready(ready) => {
                assert_eq!(ready.features, 40);
                assert_eq!(ready.classifier.name(), "LogisticRegression");
                assert!(ready.classifier.explains());
            }
            Availability::Unavailable(_) => unreachable!(),
        }
    }

    #[test]
    fn test_missing_artifacts_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            model_path: dir.path().join("model.json"),
            vectorizer_path: dir.path().join("vectorizer.json"),
            ..Default::default()
        };
        let state = AppState::load(config);
        assert!(!state.availability.is_ready());
        let failure = state.availability.failure().unwrap();
        assert_eq!(failure.messages()[0], "Model loading failed.");
    }

    #[test]
    fn test_unknown_spam_label_unavailable() {
        let mut config = demo_config();
        config.detector.spam_label = "junk".to_string();
        let availability = Availability::from_config(&config);
        assert!(availability.failure().is_some());
    }
}
