//! spamcheck Classifiers
//!
//! Everything between the two artifact files on disk and a finished
//! prediction:
//! - Artifact documents and the memoized loader
//! - The text vectorizer (counts or tf-idf over a fitted vocabulary)
//! - Probabilistic models (logistic regression, multinomial naive Bayes)
//! - The spam detector and its influential-word explanation
//!
//! All fitted state is immutable after load and shared through `Arc`.

pub mod artifact;
pub mod classifier;
pub mod config;
pub mod detector;
pub mod explain;
pub mod loader;
pub mod model;
pub mod sparse;
pub mod vectorizer;

pub use artifact::{ArtifactFile, ArtifactFormat, Artifacts, FORMAT_VERSION};
pub use classifier::{ClassificationMetadata, ClassificationResult, Classifier};
pub use config::DetectorConfig;
pub use detector::{ClassLayout, SpamDetector};
pub use loader::{ArtifactLoader, ArtifactPaths, ArtifactState, LoadFailure};
pub use model::{ClassifierArtifact, LogisticRegression, MultinomialNb};
pub use sparse::SparseVector;
pub use vectorizer::{Norm, TextVectorizer, VectorizerKind, VectorizerSpec};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::config::DetectorConfig;
    pub use crate::detector::SpamDetector;
    pub use crate::loader::{ArtifactLoader, ArtifactPaths, ArtifactState};
}
