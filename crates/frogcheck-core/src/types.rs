//! Core types for FrogCheck

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Default labels of interest: two frog species plus the generic category
pub const DEFAULT_FROG_LABELS: [&str; 3] = ["bullfrog", "tailed_frog", "tree_frog"];

/// Round to 4 decimal digits
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// The fixed set of labels this system cares about, independent of the
/// classifier's full label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetVocabulary {
    labels: Vec<String>,
}

impl TargetVocabulary {
    /// Build a vocabulary, rejecting empty labels and case-insensitive duplicates
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(Error::config("target vocabulary must not be empty"));
        }

        let mut seen = HashSet::new();
        for label in &labels {
            if label.trim().is_empty() {
                return Err(Error::config("target vocabulary contains an empty label"));
            }
            if !seen.insert(label.to_lowercase()) {
                return Err(Error::config(format!(
                    "target vocabulary contains duplicate label '{}'",
                    label
                )));
            }
        }

        Ok(Self { labels })
    }

    /// Labels in configured order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the vocabulary is empty (never true for a constructed vocabulary)
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for TargetVocabulary {
    fn default() -> Self {
        Self {
            labels: DEFAULT_FROG_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Per-label confidence for every vocabulary label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceMap {
    scores: BTreeMap<String, f64>,
}

impl ConfidenceMap {
    /// A map with every vocabulary label present at 0.0
    pub fn zeroed(vocabulary: &TargetVocabulary) -> Self {
        Self {
            scores: vocabulary
                .labels()
                .iter()
                .map(|label| (label.clone(), 0.0))
                .collect(),
        }
    }

    /// Set the confidence for a label
    pub fn set(&mut self, label: impl Into<String>, score: f64) {
        self.scores.insert(label.into(), score);
    }

    /// Confidence for a label, if present
    pub fn get(&self, label: &str) -> Option<f64> {
        self.scores.get(label).copied()
    }

    /// Iterate over (label, confidence) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(label, score)| (label.as_str(), *score))
    }

    /// Sum of all confidences
    pub fn sum(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the map has no labels
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Final classification outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationDecision {
    /// Whether the total confidence reached the decision threshold
    #[serde(rename = "is_frog")]
    pub is_match: bool,

    /// Total confidence across the vocabulary (0.0-1.0)
    #[serde(rename = "confidence")]
    pub total_confidence: f64,

    /// Confidence for each vocabulary label
    #[serde(rename = "details")]
    pub per_label: ConfidenceMap,
}
