//! Classifier trait and common types

use async_trait::async_trait;
use frogcheck_core::Result;
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Trait for all image classifiers.
///
/// Implementations are treated as black boxes: an upright, normalized RGB
/// image goes in, a label vocabulary with one probability per label comes out.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Classify the given image
    async fn classify(&self, image: &RgbImage) -> Result<ClassifierOutput>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Whether the underlying model is ready to serve
    fn is_loaded(&self) -> bool {
        true
    }
}

/// Raw classifier output.
///
/// Fields are optional so that a response missing either one can be reported
/// as a shape error instead of silently reading as zero confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    /// Label vocabulary, in classifier order
    #[serde(default)]
    pub labels: Option<Vec<String>>,

    /// One probability per label
    #[serde(default)]
    pub probabilities: Option<Vec<f32>>,
}

impl ClassifierOutput {
    /// Create output from parallel label and probability lists
    pub fn new(labels: Vec<String>, probabilities: Vec<f32>) -> Self {
        Self {
            labels: Some(labels),
            probabilities: Some(probabilities),
        }
    }

    /// Create output from (label, probability) pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let (labels, probabilities) = pairs
            .into_iter()
            .map(|(label, prob)| (label.into(), prob))
            .unzip();
        Self::new(labels, probabilities)
    }

    /// Highest-probability labels, best first
    pub fn top(&self, k: usize) -> Vec<(&str, f32)> {
        let (Some(labels), Some(probs)) = (&self.labels, &self.probabilities) else {
            return Vec::new();
        };

        let mut ranked: Vec<(&str, f32)> = labels
            .iter()
            .map(String::as_str)
            .zip(probs.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}
