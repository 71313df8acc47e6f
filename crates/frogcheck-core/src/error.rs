//! Error types for FrogCheck
//!
//! `Display` carries the full diagnostic text and is meant for logs only.
//! Callers outside the process see [`Error::public_message`] instead.

/// Result type alias using FrogCheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for FrogCheck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required request fields missing or malformed
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Declared MIME type is not in the allow-list
    #[error("unsupported media type '{content_type}'")]
    UnsupportedMediaType {
        content_type: String,
        allowed: Vec<String>,
    },

    /// Upload exceeds the configured ceiling
    #[error("payload of {actual_bytes} bytes exceeds limit of {limit_bytes} bytes")]
    PayloadTooLarge { actual_bytes: u64, limit_bytes: u64 },

    /// Bytes could not be decoded as a raster image
    #[error("undecodable image: {0}")]
    UndecodableImage(String),

    /// Shorter side below the minimum dimension
    #[error("image {width}x{height} is below minimum dimension {min_dimension}px")]
    ImageTooSmall {
        width: u32,
        height: u32,
        min_dimension: u32,
    },

    /// The external classifier raised or could not be reached
    #[error("classifier error: {0}")]
    ClassifierFailure(String),

    /// Classifier output had an unexpected shape
    #[error("result extraction error: {0}")]
    ResultExtraction(String),

    /// Object storage fetch failed
    #[error("object fetch error: {0}")]
    ObjectFetch(String),

    /// Object storage is not configured for this process
    #[error("object storage unavailable")]
    StorageUnavailable,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a new undecodable image error
    pub fn undecodable(msg: impl Into<String>) -> Self {
        Self::UndecodableImage(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::ClassifierFailure(msg.into())
    }

    /// Create a new result extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::ResultExtraction(msg.into())
    }

    /// Create a new object fetch error
    pub fn object_fetch(msg: impl Into<String>) -> Self {
        Self::ObjectFetch(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code this outcome maps to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::UnsupportedMediaType { .. } => 415,
            Self::PayloadTooLarge { .. } => 413,
            Self::UndecodableImage(_) => 400,
            Self::ImageTooSmall { .. } => 400,
            Self::ClassifierFailure(_) => 500,
            Self::ResultExtraction(_) => 500,
            Self::ObjectFetch(_) => 400,
            Self::StorageUnavailable => 503,
            Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Stable category name, used as the error `type` and as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::UnsupportedMediaType { .. } => "unsupported_media_type",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::UndecodableImage(_) => "undecodable_image",
            Self::ImageTooSmall { .. } => "image_too_small",
            Self::ClassifierFailure(_) => "classifier_failure",
            Self::ResultExtraction(_) => "result_extraction_failure",
            Self::ObjectFetch(_) => "object_fetch_failure",
            Self::StorageUnavailable => "storage_unavailable",
            Self::Config(_) | Self::Internal(_) => "internal_error",
        }
    }

    /// Sanitized message safe to return to callers.
    ///
    /// Never includes decoder, transport, or classifier error text.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => msg.clone(),
            Self::UnsupportedMediaType { allowed, .. } => {
                format!("Unsupported media type. Allowed types: {}", allowed.join(", "))
            }
            Self::PayloadTooLarge { limit_bytes, .. } => {
                format!("File size exceeds {}MB limit", limit_bytes / (1024 * 1024))
            }
            Self::UndecodableImage(_) => "Invalid image file".to_string(),
            Self::ImageTooSmall { min_dimension, .. } => {
                format!("Image too small. Minimum dimension: {}px", min_dimension)
            }
            Self::ClassifierFailure(_) => "Model inference error".to_string(),
            Self::ResultExtraction(_) => "Error processing model results".to_string(),
            Self::ObjectFetch(_) => "Failed to load image from object storage".to_string(),
            Self::StorageUnavailable => "Object storage is not configured".to_string(),
            Self::Config(_) | Self::Internal(_) => {
                "Internal server error during image processing".to_string()
            }
        }
    }
}
