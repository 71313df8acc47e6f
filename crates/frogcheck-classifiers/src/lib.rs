//! FrogCheck Classifiers
//!
//! Everything downstream of image preprocessing:
//! - [`ImageClassifier`]: the seam to the external model (remote or static)
//! - [`ConfidenceExtractor`]: maps classifier labels onto the target vocabulary
//! - [`DecisionAggregator`]: sums confidences and applies the threshold
//! - [`RequestPipeline`]: runs all stages for one upload

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod extractor;
pub mod fixed;
pub mod pipeline;
pub mod registry;
pub mod remote;

pub use aggregator::DecisionAggregator;
pub use classifier::{ClassifierOutput, ImageClassifier};
pub use config::ClassifierBackendConfig;
pub use extractor::ConfidenceExtractor;
pub use fixed::StaticClassifier;
pub use pipeline::{ImageUpload, RequestPipeline};
pub use registry::{build_classifier, SharedClassifier};
pub use remote::RemoteClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassifierOutput, ImageClassifier};
    pub use crate::pipeline::{ImageUpload, RequestPipeline};
    pub use crate::registry::SharedClassifier;
}
