//! Request pipeline: untrusted bytes in, classification decision out
//!
//! Stages run strictly in order, each consuming the previous stage's output:
//! validate (content type, size, decode, orientation, dimensions) →
//! normalize → classify → extract → aggregate.
//!
//! Every failure surfaces as a categorized [`Error`]; nothing is retried.

use bytes::Bytes;
use frogcheck_core::{ClassificationDecision, Error, ProcessingConfig, Result};
use frogcheck_image::{ImageNormalizer, ImageValidator};
use frogcheck_telemetry::PipelineMetrics;
use image::RgbImage;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::aggregator::DecisionAggregator;
use crate::extractor::ConfidenceExtractor;
use crate::registry::SharedClassifier;

/// Raw upload bytes together with the declared MIME type
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: String,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Orchestrates preprocessing, inference, and decisioning for one request
#[derive(Clone)]
pub struct RequestPipeline {
    config: Arc<ProcessingConfig>,
    validator: ImageValidator,
    normalizer: ImageNormalizer,
    classifier: SharedClassifier,
    extractor: Arc<ConfidenceExtractor>,
    aggregator: DecisionAggregator,
    metrics: PipelineMetrics,
}

impl RequestPipeline {
    /// Build a pipeline over a validated configuration and a classifier
    pub fn new(config: Arc<ProcessingConfig>, classifier: SharedClassifier) -> Result<Self> {
        config.validate()?;
        let vocabulary = config.vocabulary()?;

        Ok(Self {
            validator: ImageValidator::new(config.clone()),
            normalizer: ImageNormalizer::new(config.clone()),
            extractor: Arc::new(ConfidenceExtractor::new(vocabulary)),
            aggregator: DecisionAggregator::new(config.decision_threshold),
            classifier,
            metrics: PipelineMetrics::new(),
            config,
        })
    }

    /// Share an existing metrics collector
    pub fn with_metrics(mut self, metrics: PipelineMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Validator for transports that check content type and size early
    pub fn validator(&self) -> &ImageValidator {
        &self.validator
    }

    pub fn classifier(&self) -> &SharedClassifier {
        &self.classifier
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Run one upload through every stage
    pub async fn run(&self, upload: ImageUpload) -> Result<ClassificationDecision> {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "classify",
            %request_id,
            content_type = %upload.content_type,
            bytes = upload.bytes.len()
        );

        async move {
            let start = Instant::now();
            self.metrics.record_request();

            let result = self.execute(upload).await;
            let latency_us = start.elapsed().as_micros() as u64;
            self.metrics.record_latency(latency_us);

            match &result {
                Ok(decision) => {
                    self.metrics.record_decision(decision.is_match);
                    info!(
                        is_frog = decision.is_match,
                        confidence = decision.total_confidence,
                        latency_ms = latency_us / 1000,
                        "Classification complete"
                    );
                }
                Err(e) => {
                    self.metrics.record_failure(e.kind());
                    if e.status_code() >= 500 {
                        error!(kind = e.kind(), error = %e, "Classification failed");
                    } else {
                        warn!(kind = e.kind(), error = %e, "Upload rejected");
                    }
                }
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, upload: ImageUpload) -> Result<ClassificationDecision> {
        let prepared = self.preprocess(upload).await?;

        let start = Instant::now();
        let output = self
            .classifier
            .classify(&prepared)
            .await
            .map_err(|e| match e {
                Error::ClassifierFailure(_) | Error::ResultExtraction(_) => e,
                other => Error::classifier(other.to_string()),
            })?;
        let classifier_latency_us = start.elapsed().as_micros() as u64;
        self.metrics.record_classifier_latency(classifier_latency_us);

        debug!(
            classifier = self.classifier.name(),
            latency_us = classifier_latency_us,
            top = ?output.top(3),
            "Classifier returned"
        );

        let scores = self.extractor.extract(&output)?;
        self.aggregator.aggregate(scores)
    }

    /// Decode, orient, validate, and normalize on a blocking thread
    async fn preprocess(&self, upload: ImageUpload) -> Result<RgbImage> {
        // Content type and size are settled before any bytes reach the decoder
        self.validator.check_content_type(&upload.content_type)?;
        self.validator.check_size(upload.bytes.len() as u64)?;

        let validator = self.validator.clone();
        let normalizer = self.normalizer.clone();

        tokio::task::spawn_blocking(move || {
            let decoded = validator.validate(&upload.content_type, &upload.bytes)?;
            Ok::<_, Error>(normalizer.normalize(decoded.image))
        })
        .await
        .map_err(|e| Error::internal(format!("preprocessing task failed: {}", e)))?
    }
}
