//! Object storage fetch for the bucket/key path
//!
//! One `GetObject` per request. The advertised length is checked against the
//! upload ceiling before the body is read, and the body itself is counted as
//! it streams since the length header can be absent or wrong.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::{Bytes, BytesMut};
use frogcheck_classifiers::ImageUpload;
use frogcheck_core::{Error, Result};
use tracing::{debug, info, warn};

use crate::config::StorageConfig;

/// Fetches an object as an upload candidate
#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    /// Load `bucket`/`key`, refusing objects larger than `max_bytes`
    async fn fetch(&self, bucket: &str, key: &str, max_bytes: u64) -> Result<ImageUpload>;
}

/// S3-compatible fetcher
#[derive(Clone)]
pub struct S3ObjectFetcher {
    client: Client,
}

impl S3ObjectFetcher {
    /// Build a client from the default AWS provider chain plus overrides
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        info!(
            region = ?config.region,
            endpoint = ?config.endpoint_url,
            "Object storage client initialized"
        );

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

#[async_trait]
impl ObjectFetcher for S3ObjectFetcher {
    async fn fetch(&self, bucket: &str, key: &str, max_bytes: u64) -> Result<ImageUpload> {
        debug!(bucket, key, "Fetching object");

        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                warn!(bucket, key, error = %DisplayErrorContext(&e), "GetObject failed");
                Error::object_fetch(format!("get {}/{}: {}", bucket, key, e))
            })?;

        if let Some(length) = output.content_length().filter(|len| *len > 0) {
            if length as u64 > max_bytes {
                return Err(Error::PayloadTooLarge {
                    actual_bytes: length as u64,
                    limit_bytes: max_bytes,
                });
            }
        }

        let content_type = resolve_content_type(output.content_type(), key);

        let bytes = read_limited(output.body, max_bytes).await.map_err(|e| {
            warn!(bucket, key, error = %e, "Object body read failed");
            e
        })?;

        debug!(bucket, key, bytes = bytes.len(), %content_type, "Object fetched");
        Ok(ImageUpload::new(content_type, bytes))
    }
}

/// Drain `body`, stopping with `PayloadTooLarge` once it passes `max_bytes`
pub async fn read_limited(mut body: ByteStream, max_bytes: u64) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = body
        .try_next()
        .await
        .map_err(|e| Error::object_fetch(format!("read body: {}", e)))?
    {
        let total = (buf.len() + chunk.len()) as u64;
        if total > max_bytes {
            return Err(Error::PayloadTooLarge {
                actual_bytes: total,
                limit_bytes: max_bytes,
            });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

/// Declared content type, falling back to the key's extension when the
/// metadata is missing or generic
pub fn resolve_content_type(declared: Option<&str>, key: &str) -> String {
    match declared.map(str::trim) {
        Some(ct)
            if !ct.is_empty()
                && !ct.eq_ignore_ascii_case("application/octet-stream")
                && !ct.eq_ignore_ascii_case("binary/octet-stream") =>
        {
            ct.to_string()
        }
        _ => mime_guess::from_path(key)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string(),
    }
}
