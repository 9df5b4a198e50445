//! spamcheck Core
//!
//! Types shared across spamcheck components.
//!
//! This crate provides:
//! - Error types and result handling
//! - The prediction data model (labels, validated input, results)

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{InfluentialWord, InputText, Label, PredictionResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{InfluentialWord, InputText, Label, PredictionResult};
}
