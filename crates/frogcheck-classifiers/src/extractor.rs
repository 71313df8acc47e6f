//! Maps classifier output onto the target vocabulary

use frogcheck_core::{ConfidenceMap, Error, Result, TargetVocabulary};
use std::collections::HashMap;
use tracing::debug;

use crate::classifier::ClassifierOutput;

/// Float slack tolerated above 1.0 before a probability counts as malformed
const PROBABILITY_EPSILON: f32 = 1e-6;

/// Extracts per-label confidence for the target vocabulary
#[derive(Debug, Clone)]
pub struct ConfidenceExtractor {
    vocabulary: TargetVocabulary,
}

impl ConfidenceExtractor {
    pub fn new(vocabulary: TargetVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &TargetVocabulary {
        &self.vocabulary
    }

    /// Look up every vocabulary label case-insensitively.
    ///
    /// Labels the classifier does not surface read as 0.0. When the classifier
    /// returns case variants of the same label, the first one wins.
    pub fn extract(&self, output: &ClassifierOutput) -> Result<ConfidenceMap> {
        let labels = output
            .labels
            .as_ref()
            .ok_or_else(|| Error::extraction("classifier output has no labels"))?;
        let probabilities = output
            .probabilities
            .as_ref()
            .ok_or_else(|| Error::extraction("classifier output has no probabilities"))?;

        if labels.len() != probabilities.len() {
            return Err(Error::extraction(format!(
                "{} labels but {} probabilities",
                labels.len(),
                probabilities.len()
            )));
        }

        let mut lookup: HashMap<String, f64> = HashMap::with_capacity(labels.len());
        for (label, &prob) in labels.iter().zip(probabilities) {
            if !prob.is_finite() || prob < 0.0 || prob > 1.0 + PROBABILITY_EPSILON {
                return Err(Error::extraction(format!(
                    "probability {} for label '{}' is outside [0, 1]",
                    prob, label
                )));
            }
            lookup
                .entry(label.to_lowercase())
                .or_insert(prob.min(1.0) as f64);
        }

        let mut scores = ConfidenceMap::zeroed(&self.vocabulary);
        for target in self.vocabulary.labels() {
            if let Some(&prob) = lookup.get(&target.to_lowercase()) {
                scores.set(target.clone(), prob);
            }
        }

        debug!(
            classifier_labels = labels.len(),
            matched = scores.iter().filter(|(_, s)| *s > 0.0).count(),
            "Extracted target confidences"
        );

        Ok(scores)
    }
}
