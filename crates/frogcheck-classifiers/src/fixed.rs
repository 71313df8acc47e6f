//! Classifier that returns configured scores regardless of input

use async_trait::async_trait;
use frogcheck_core::Result;
use image::RgbImage;

use crate::classifier::{ClassifierOutput, ImageClassifier};

/// Deterministic classifier for local runs without an inference server
pub struct StaticClassifier {
    name: String,
    scores: Vec<(String, f32)>,
}

impl StaticClassifier {
    pub fn new<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            name: "static".to_string(),
            scores: scores.into_iter().map(|(l, s)| (l.into(), s)).collect(),
        }
    }
}

#[async_trait]
impl ImageClassifier for StaticClassifier {
    async fn classify(&self, _image: &RgbImage) -> Result<ClassifierOutput> {
        Ok(ClassifierOutput::from_pairs(self.scores.iter().cloned()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_configured_scores() {
        let classifier = StaticClassifier::new([("bullfrog", 0.8f32), ("tabby", 0.2)]);
        let output = classifier.classify(&RgbImage::new(1, 1)).await.unwrap();
        assert_eq!(output, ClassifierOutput::from_pairs([("bullfrog", 0.8), ("tabby", 0.2)]));
        assert_eq!(classifier.name(), "static");
        assert!(classifier.is_loaded());
    }
}
