//! Input validation for untrusted uploads
//!
//! Cheap checks (declared content type, byte length) run before any decode.
//! The dimension check runs on the upright image.

use frogcheck_core::{Error, ProcessingConfig, Result};
use std::sync::Arc;
use tracing::debug;

use crate::orientation::{read_orientation, DecodedImage, OrientationNormalizer};

/// Validates uploads against the configured limits
#[derive(Debug, Clone)]
pub struct ImageValidator {
    config: Arc<ProcessingConfig>,
    orientation: OrientationNormalizer,
}

impl ImageValidator {
    pub fn new(config: Arc<ProcessingConfig>) -> Self {
        Self {
            config,
            orientation: OrientationNormalizer::new(),
        }
    }

    /// Reject declared MIME types outside the allow-list. Bytes are not sniffed.
    pub fn check_content_type(&self, content_type: &str) -> Result<()> {
        if self.config.is_mime_allowed(content_type) {
            Ok(())
        } else {
            Err(Error::UnsupportedMediaType {
                content_type: content_type.to_string(),
                allowed: self.config.allowed_mime_types.clone(),
            })
        }
    }

    /// Reject payloads above the upload ceiling.
    ///
    /// Takes only a length so streaming transports can call it before the
    /// body is buffered.
    pub fn check_size(&self, len: u64) -> Result<()> {
        if len > self.config.max_upload_bytes {
            Err(Error::PayloadTooLarge {
                actual_bytes: len,
                limit_bytes: self.config.max_upload_bytes,
            })
        } else {
            Ok(())
        }
    }

    /// Decode raw bytes and read their orientation tag
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
        if bytes.is_empty() {
            return Err(Error::undecodable("empty payload"));
        }

        let image = image::load_from_memory(bytes).map_err(|e| Error::undecodable(e.to_string()))?;
        let orientation = read_orientation(bytes);

        debug!(
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            exif_orientation = orientation.exif_code(),
            "Decoded image"
        );

        Ok(DecodedImage::new(image, orientation))
    }

    /// Reject images whose shorter side is below the minimum
    pub fn check_dimensions(&self, decoded: &DecodedImage) -> Result<()> {
        let (width, height) = (decoded.width(), decoded.height());
        if width.min(height) < self.config.min_dimension {
            return Err(Error::ImageTooSmall {
                width,
                height,
                min_dimension: self.config.min_dimension,
            });
        }
        Ok(())
    }

    /// Run every check in order and return the upright, validated image
    pub fn validate(&self, content_type: &str, bytes: &[u8]) -> Result<DecodedImage> {
        self.check_content_type(content_type)?;
        self.check_size(bytes.len() as u64)?;

        let decoded = self.decode(bytes)?;
        let upright = self.orientation.normalize(decoded);
        self.check_dimensions(&upright)?;

        Ok(upright)
    }
}
