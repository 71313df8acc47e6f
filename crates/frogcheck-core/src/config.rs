//! Processing limits and thresholds
//!
//! A single [`ProcessingConfig`] is built at process start, validated once,
//! and handed to every stage behind an `Arc`. Nothing mutates it afterwards.

use crate::error::{Error, Result};
use crate::types::{TargetVocabulary, DEFAULT_FROG_LABELS};
use serde::{Deserialize, Serialize};

/// Limits and thresholds applied by the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Declared MIME types accepted for upload
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,

    /// Minimum length of the shorter side, in pixels
    #[serde(default = "default_min_dimension")]
    pub min_dimension: u32,

    /// Longer side is capped at this many pixels before the main resize
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// Upload ceiling in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Canvas width the image is fitted into
    #[serde(default = "default_target_size")]
    pub target_width: u32,

    /// Canvas height the image is fitted into
    #[serde(default = "default_target_size")]
    pub target_height: u32,

    /// JPEG quality used when the normalized image is re-encoded (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Total confidence at or above which the image is a match
    #[serde(default = "default_threshold")]
    pub decision_threshold: f64,

    /// Labels of interest
    #[serde(default = "default_target_labels")]
    pub target_labels: Vec<String>,
}

impl ProcessingConfig {
    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.allowed_mime_types.is_empty() {
            return Err(Error::config("allowed_mime_types must not be empty"));
        }
        if self.min_dimension == 0 {
            return Err(Error::config("min_dimension must be positive"));
        }
        if self.min_dimension > self.max_dimension {
            return Err(Error::config(format!(
                "min_dimension ({}) exceeds max_dimension ({})",
                self.min_dimension, self.max_dimension
            )));
        }
        if self.max_upload_bytes == 0 {
            return Err(Error::config("max_upload_bytes must be positive"));
        }
        if self.target_width == 0 || self.target_height == 0 {
            return Err(Error::config("target canvas must be non-empty"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::config(format!(
                "jpeg_quality must be within 1-100, got {}",
                self.jpeg_quality
            )));
        }
        if !(0.0..=1.0).contains(&self.decision_threshold) {
            return Err(Error::config(format!(
                "decision_threshold must be within [0, 1], got {}",
                self.decision_threshold
            )));
        }
        self.vocabulary()?;
        Ok(())
    }

    /// Build the target vocabulary from the configured labels
    pub fn vocabulary(&self) -> Result<TargetVocabulary> {
        TargetVocabulary::new(self.target_labels.iter().cloned())
    }

    /// Whether a declared content type is in the allow-list.
    ///
    /// Media-type parameters are ignored and the comparison is case-insensitive.
    pub fn is_mime_allowed(&self, content_type: &str) -> bool {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&essence))
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: default_allowed_mime_types(),
            min_dimension: default_min_dimension(),
            max_dimension: default_max_dimension(),
            max_upload_bytes: default_max_upload_bytes(),
            target_width: default_target_size(),
            target_height: default_target_size(),
            jpeg_quality: default_jpeg_quality(),
            decision_threshold: default_threshold(),
            target_labels: default_target_labels(),
        }
    }
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/webp".to_string(),
    ]
}

fn default_min_dimension() -> u32 {
    320
}

fn default_max_dimension() -> u32 {
    5000
}

fn default_max_upload_bytes() -> u64 {
    50 * 1024 * 1024
}

fn default_target_size() -> u32 {
    1080
}

fn default_jpeg_quality() -> u8 {
    90
}

fn default_threshold() -> f64 {
    0.5
}

fn default_target_labels() -> Vec<String> {
    DEFAULT_FROG_LABELS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ProcessingConfig::default();
        config.validate().unwrap();
        assert_eq!(config.min_dimension, 320);
        assert_eq!(config.max_dimension, 5000);
        assert_eq!(config.max_upload_bytes, 52_428_800);
        assert_eq!((config.target_width, config.target_height), (1080, 1080));
        assert_eq!(config.decision_threshold, 0.5);
    }

    #[test]
    fn test_mime_matching_ignores_case_and_parameters() {
        let config = ProcessingConfig::default();
        assert!(config.is_mime_allowed("image/jpeg"));
        assert!(config.is_mime_allowed("IMAGE/PNG"));
        assert!(config.is_mime_allowed("image/webp; charset=binary"));
        assert!(!config.is_mime_allowed("image/gif"));
        assert!(!config.is_mime_allowed("text/plain"));
        assert!(!config.is_mime_allowed(""));
    }

    #[test]
    fn test_validate_rejects_inconsistent_limits() {
        let mut config = ProcessingConfig::default();
        config.min_dimension = 6000;
        assert!(config.validate().is_err());

        let mut config = ProcessingConfig::default();
        config.decision_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = ProcessingConfig::default();
        config.jpeg_quality = 0;
        assert!(config.validate().is_err());

        let mut config = ProcessingConfig::default();
        config.target_labels = vec!["bullfrog".into(), "BULLFROG".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ProcessingConfig =
            serde_json::from_str(r#"{ "min_dimension": 64, "max_upload_bytes": 1024 }"#).unwrap();
        assert_eq!(config.min_dimension, 64);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.max_dimension, 5000);
        assert_eq!(config.target_labels.len(), 3);
    }
}
