//! Artifact loading, memoized for the process lifetime

use crate::artifact::Artifacts;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tracing::{error, info};

/// Default model artifact filename
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Default vectorizer artifact filename
pub const DEFAULT_VECTORIZER_PATH: &str = "vectorizer.json";

/// Locations of the two artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub vectorizer: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            vectorizer: PathBuf::from(DEFAULT_VECTORIZER_PATH),
        }
    }
}

impl ArtifactPaths {
    pub fn new(model: impl Into<PathBuf>, vectorizer: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            vectorizer: vectorizer.into(),
        }
    }
}

/// Why the artifacts could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// Paths that were attempted
    pub paths: ArtifactPaths,

    /// Underlying cause, for logs
    pub reason: String,
}

impl LoadFailure {
    /// The user-facing error lines
    pub fn messages(&self) -> Vec<String> {
        vec![
            "Model loading failed.".to_string(),
            format!(
                "Make sure '{}' and '{}' are in the app folder.",
                self.paths.model.display(),
                self.paths.vectorizer.display()
            ),
        ]
    }
}

/// Result of the one-time load
#[derive(Debug, Clone)]
pub enum ArtifactState {
    Loaded(Arc<Artifacts>),
    Failed(LoadFailure),
}

impl ArtifactState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn artifacts(&self) -> Option<&Arc<Artifacts>> {
        match self {
            Self::Loaded(artifacts) => Some(artifacts),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

/// Reads both artifacts once; every later call returns the cached state
#[derive(Debug)]
pub struct ArtifactLoader {
    paths: ArtifactPaths,
    state: OnceLock<ArtifactState>,
}

impl ArtifactLoader {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            state: OnceLock::new(),
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Load the artifacts on first call. Never fails; failures are captured in the state.
    pub fn load(&self) -> &ArtifactState {
        self.state.get_or_init(|| self.read())
    }

    /// Whether a load has already happened
    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    fn read(&self) -> ArtifactState {
        info!(
            model = %self.paths.model.display(),
            vectorizer = %self.paths.vectorizer.display(),
            "Loading artifacts"
        );

        match Artifacts::read(&self.paths.model, &self.paths.vectorizer) {
            Ok(artifacts) => {
                info!(
                    model = artifacts.model.name(),
                    features = artifacts.vectorizer.n_features(),
                    "Artifacts loaded"
                );
                ArtifactState::Loaded(Arc::new(artifacts))
            }
            Err(e) => {
                error!("Model loading failed: {}", e);
                ArtifactState::Failed(LoadFailure {
                    paths: self.paths.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_fail_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ArtifactLoader::new(ArtifactPaths::new(
            dir.path().join("model.json"),
            dir.path().join("vectorizer.json"),
        ));

        assert!(!loader.is_initialized());
        let state = loader.load();
        assert!(!state.is_loaded());
        assert!(state.artifacts().is_none());

        let failure = state.failure().unwrap();
        assert!(failure.reason.starts_with("io error"));
        let messages = failure.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "Model loading failed.");
        assert!(messages[1].contains("model.json"));
        assert!(messages[1].contains("vectorizer.json"));
    }

    #[test]
    fn test_default_paths() {
        let paths = ArtifactPaths::default();
        assert_eq!(paths.model, PathBuf::from("model.json"));
        assert_eq!(paths.vectorizer, PathBuf::from("vectorizer.json"));
    }
}
