//! Classifier backed by an HTTP inference server
//!
//! The normalized image is JPEG-encoded and posted as multipart field `file`.
//! The server answers with `{ "labels": [...], "probabilities": [...] }`.
//! `is_loaded` reports whether the most recent call got a usable answer.

use async_trait::async_trait;
use frogcheck_core::{Error, Result};
use frogcheck_image::encode_jpeg;
use image::RgbImage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::classifier::{ClassifierOutput, ImageClassifier};

/// HTTP inference client
pub struct RemoteClassifier {
    name: String,
    endpoint: String,
    client: reqwest::Client,
    jpeg_quality: u8,
    last_call_ok: AtomicBool,
}

impl RemoteClassifier {
    /// Create a client for the given prediction endpoint
    pub fn new(endpoint: impl Into<String>, timeout: Duration, jpeg_quality: u8) -> Result<Self> {
        let endpoint = endpoint.into();
        reqwest::Url::parse(&endpoint)
            .map_err(|e| Error::config(format!("invalid classifier endpoint '{}': {}", endpoint, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            name: "remote".to_string(),
            endpoint,
            client,
            jpeg_quality,
            // Optimistic until the first call says otherwise
            last_call_ok: AtomicBool::new(true),
        })
    }

    /// Override the classifier name reported in logs
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn infer(&self, image: &RgbImage) -> Result<ClassifierOutput> {
        let start = Instant::now();
        let jpeg = encode_jpeg(image, self.jpeg_quality)?;
        let payload_bytes = jpeg.len();

        let part = reqwest::multipart::Part::bytes(jpeg)
            .file_name("image.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| Error::internal(format!("invalid multipart part: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::classifier(format!("request to {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, %status, "Inference server rejected request");
            return Err(Error::classifier(format!(
                "inference server returned {}",
                status
            )));
        }

        let output: ClassifierOutput = response
            .json()
            .await
            .map_err(|e| Error::classifier(format!("invalid inference response: {}", e)))?;

        debug!(
            endpoint = %self.endpoint,
            payload_bytes,
            latency_ms = start.elapsed().as_millis() as u64,
            "Remote inference complete"
        );

        Ok(output)
    }
}

#[async_trait]
impl ImageClassifier for RemoteClassifier {
    async fn classify(&self, image: &RgbImage) -> Result<ClassifierOutput> {
        let result = self.infer(image).await;
        self.last_call_ok.store(result.is_ok(), Ordering::Relaxed);
        result
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_loaded(&self) -> bool {
        self.last_call_ok.load(Ordering::Relaxed)
    }
}
