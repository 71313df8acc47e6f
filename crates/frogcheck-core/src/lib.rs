//! FrogCheck Core
//!
//! Core types, configuration, and error handling shared across FrogCheck components.
//!
//! This crate provides:
//! - The error taxonomy every pipeline stage reports into
//! - The confidence and decision data model returned to callers
//! - Process-wide processing limits (thresholds, dimensions, allow-lists)

pub mod config;
pub mod error;
pub mod types;

pub use config::ProcessingConfig;
pub use error::{Error, Result};
pub use types::{round4, ClassificationDecision, ConfidenceMap, TargetVocabulary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ProcessingConfig;
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassificationDecision, ConfidenceMap, TargetVocabulary};
}
