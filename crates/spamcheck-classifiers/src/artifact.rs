//! On-disk artifact documents
//!
//! Each artifact file is an envelope around the fitted state:
//!
//! ```json
//! { "format_version": 1, "artifact": { ... } }
//! ```
//!
//! Files ending in `.yaml` / `.yml` are read as YAML, everything else as JSON.

use crate::model::ClassifierArtifact;
use crate::vectorizer::{TextVectorizer, VectorizerSpec};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use spamcheck_core::{Error, Result};
use std::path::Path;

/// Artifact format version understood by this build
pub const FORMAT_VERSION: u32 = 1;

/// Envelope shared by model and vectorizer documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile<T> {
    pub format_version: u32,
    pub artifact: T,
}

impl<T> ArtifactFile<T> {
    pub fn new(artifact: T) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            artifact,
        }
    }
}

/// Document encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Yaml,
}

impl ArtifactFormat {
    /// Pick the encoding from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// The loaded model and vectorizer pair
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: ClassifierArtifact,
    pub vectorizer: TextVectorizer,
}

impl Artifacts {
    /// Read and validate both artifacts
    pub fn read(model_path: &Path, vectorizer_path: &Path) -> Result<Self> {
        let model = read_model(model_path)?;
        let vectorizer = read_vectorizer(vectorizer_path)?;

        if model.n_features() != vectorizer.n_features() {
            tracing::warn!(
                model_features = model.n_features(),
                vectorizer_features = vectorizer.n_features(),
                "Model and vectorizer disagree on feature count; predictions will fail"
            );
        }

        Ok(Self { model, vectorizer })
    }
}

/// Read a classifier artifact
pub fn read_model(path: &Path) -> Result<ClassifierArtifact> {
    let model: ClassifierArtifact = decode(path)?;
    model.validate()?;
    Ok(model)
}

/// Read a vectorizer artifact
pub fn read_vectorizer(path: &Path) -> Result<TextVectorizer> {
    let spec: VectorizerSpec = decode(path)?;
    TextVectorizer::from_spec(spec)
}

/// Decode an artifact envelope and check its version
pub fn decode<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    decode_str(&content, ArtifactFormat::from_path(path))
}

/// Decode an artifact envelope from an in-memory document
pub fn decode_str<T: DeserializeOwned>(content: &str, format: ArtifactFormat) -> Result<T> {
    let file: ArtifactFile<T> = match format {
        ArtifactFormat::Json => serde_json::from_str(content)?,
        ArtifactFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| Error::artifact(format!("invalid YAML artifact: {}", e)))?,
    };

    if file.format_version != FORMAT_VERSION {
        return Err(Error::artifact(format!(
            "unsupported artifact format_version {} (expected {})",
            file.format_version, FORMAT_VERSION
        )));
    }

    Ok(file.artifact)
}
