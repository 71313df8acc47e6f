//! Classifier construction from configuration

use frogcheck_core::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::ClassifierBackendConfig;
use crate::fixed::StaticClassifier;
use crate::remote::RemoteClassifier;
use crate::ImageClassifier;

/// Shared handle to the process-wide classifier
pub type SharedClassifier = Arc<dyn ImageClassifier>;

/// Build the configured classifier backend.
///
/// `jpeg_quality` applies to backends that re-encode the normalized image.
pub fn build_classifier(config: &ClassifierBackendConfig, jpeg_quality: u8) -> Result<SharedClassifier> {
    match config {
        ClassifierBackendConfig::Remote {
            endpoint,
            timeout_secs,
        } => {
            info!("Using remote classifier at {}", endpoint);
            let classifier =
                RemoteClassifier::new(endpoint.clone(), Duration::from_secs(*timeout_secs), jpeg_quality)?;
            Ok(Arc::new(classifier))
        }
        ClassifierBackendConfig::Static { scores } => {
            warn!(
                "Using static classifier with {} fixed scores; results do not depend on the image",
                scores.len()
            );
            Ok(Arc::new(StaticClassifier::new(
                scores.iter().map(|(label, score)| (label.clone(), *score)),
            )))
        }
    }
}
