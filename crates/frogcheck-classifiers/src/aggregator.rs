//! Threshold decision over extracted confidences

use frogcheck_core::{round4, ClassificationDecision, ConfidenceMap, Error, Result};

/// Sums vocabulary confidences and applies the decision threshold
#[derive(Debug, Clone, Copy)]
pub struct DecisionAggregator {
    threshold: f64,
}

impl DecisionAggregator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Per-label scores and the total are each rounded to 4 digits from the
    /// raw values; the threshold is applied to the rounded total so the
    /// reported `confidence` and `is_frog` always agree.
    ///
    /// A total above 1.0 means the classifier's probabilities are not a
    /// distribution over the vocabulary and is reported as an extraction error.
    pub fn aggregate(&self, scores: ConfidenceMap) -> Result<ClassificationDecision> {
        let total_confidence = round4(scores.sum());
        if total_confidence > 1.0 {
            return Err(Error::extraction(format!(
                "target confidences sum to {}, above 1.0",
                total_confidence
            )));
        }

        let mut per_label = ConfidenceMap::default();
        for (label, score) in scores.iter() {
            per_label.set(label, round4(score));
        }

        Ok(ClassificationDecision {
            is_match: total_confidence >= self.threshold,
            total_confidence,
            per_label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frogcheck_core::TargetVocabulary;
    use proptest::prelude::*;

    fn scores(bull: f64, tailed: f64, tree: f64) -> ConfidenceMap {
        let mut map = ConfidenceMap::zeroed(&TargetVocabulary::default());
        map.set("bullfrog", bull);
        map.set("tailed_frog", tailed);
        map.set("tree_frog", tree);
        map
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let agg = DecisionAggregator::new(0.5);
        assert!(agg.aggregate(scores(0.25, 0.25, 0.0)).unwrap().is_match);
        assert!(!agg.aggregate(scores(0.2, 0.2, 0.0999)).unwrap().is_match);
    }

    #[test]
    fn test_rounding_points() {
        let decision = DecisionAggregator::new(0.5).aggregate(scores(0.123456, 0.0, 0.0)).unwrap();
        assert_eq!(decision.total_confidence, 0.1235);
        assert_eq!(decision.per_label.get("bullfrog"), Some(0.1235));
        assert_eq!(decision.per_label.len(), 3);
    }

    #[test]
    fn test_rounded_total_drives_decision() {
        // Raw sum 0.49996 rounds up to the threshold
        let decision = DecisionAggregator::new(0.5).aggregate(scores(0.49996, 0.0, 0.0)).unwrap();
        assert_eq!(decision.total_confidence, 0.5);
        assert!(decision.is_match);
    }

    #[test]
    fn test_total_above_one_is_extraction_failure() {
        let err = DecisionAggregator::new(0.5)
            .aggregate(scores(0.6, 0.6, 0.0))
            .unwrap_err();
        assert!(matches!(err, Error::ResultExtraction(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_total_of_exactly_one_accepted() {
        let decision = DecisionAggregator::new(0.5)
            .aggregate(scores(0.5, 0.25, 0.25))
            .unwrap();
        assert_eq!(decision.total_confidence, 1.0);
        assert_eq!(decision.per_label.sum(), decision.total_confidence);
    }

    proptest! {
        #[test]
        fn prop_decision_consistent(
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
            c in 0.0f64..=1.0,
        ) {
            // Normalized distribution: the three labels share at most 1.0
            let norm = (a + b + c).max(1.0);
            let decision = DecisionAggregator::new(0.5).aggregate(scores(a / norm, b / norm, c / norm)).unwrap();

            prop_assert!((0.0..=1.0).contains(&decision.total_confidence));
            prop_assert_eq!(decision.is_match, decision.total_confidence >= 0.5);
            prop_assert!((decision.per_label.sum() - decision.total_confidence).abs() < 0.001);
            for (_, score) in decision.per_label.iter() {
                prop_assert!((0.0..=1.0).contains(&score));
            }
        }
    }
}
