//! Application configuration

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use spamcheck_classifiers::loader::{DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};
use spamcheck_classifiers::{ArtifactPaths, DetectorConfig};
use std::path::{Path, PathBuf};

/// Text the input box starts with
pub const DEFAULT_TEXT: &str = "Win a free iPhone! Click here to claim now.";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model artifact path
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Vectorizer artifact path
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,

    /// Threshold, spam label and explanation size
    #[serde(default)]
    pub detector: DetectorConfig,

    /// Initial content of the input box
    #[serde(default = "default_text")]
    pub default_text: String,

    /// Web UI listener
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            tracing::debug!("No config file at {}, using defaults", config_path);
            Self::default()
        };

        // Apply CLI overrides
        if let Some(model) = &cli.model {
            config.model_path = model.clone();
        }

        if let Some(vectorizer) = &cli.vectorizer {
            config.vectorizer_path = vectorizer.clone();
        }

        config.detector.validate()?;
        Ok(config)
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.model_path, &self.vectorizer_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            vectorizer_path: default_vectorizer_path(),
            detector: DetectorConfig::default(),
            default_text: default_text(),
            server: ServerConfig::default(),
        }
    }
}

/// Web UI listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from(DEFAULT_VECTORIZER_PATH)
}

fn default_text() -> String {
    DEFAULT_TEXT.to_string()
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}
