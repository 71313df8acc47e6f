//! HTTP routes and handlers

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bytes::BytesMut;
use frogcheck_classifiers::ImageUpload;
use frogcheck_core::{ClassificationDecision, Error};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

/// Room for multipart framing on top of the upload ceiling
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.pipeline.config().max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/classify-frog", post(classify_frog))
        .route("/classify-object", post(classify_object))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .fallback(fallback)
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "model_loaded": state.pipeline.classifier().is_loaded(),
        "stats": state.pipeline.metrics().snapshot(),
    }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Direct upload: multipart field `file` with its declared content type
async fn classify_frog(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ClassificationDecision>, AppError> {
    let mut multipart = multipart.map_err(|e| {
        warn!(detail = %e.body_text(), "Multipart extraction failed");
        reject(Error::invalid_request("Expected multipart/form-data body"))
    })?;
    let validator = state.pipeline.validator();
    let limit = state.pipeline.config().max_upload_bytes;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        // A part without a content type is treated as opaque bytes
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        validator.check_content_type(&content_type).map_err(reject)?;

        let mut buf = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, limit))?
        {
            validator
                .check_size((buf.len() + chunk.len()) as u64)
                .map_err(reject)?;
            buf.extend_from_slice(&chunk);
        }

        let decision = state
            .pipeline
            .run(ImageUpload::new(content_type, buf.freeze()))
            .await?;
        return Ok(Json(decision));
    }

    Err(Error::invalid_request("No file uploaded").into())
}

#[derive(Debug, Default, Deserialize)]
struct ObjectRequest {
    #[serde(default)]
    bucket: Option<String>,
    #[serde(default)]
    key: Option<String>,
}

/// Event-driven path: classify an object already in storage
async fn classify_object(
    State(state): State<AppState>,
    payload: Result<Json<ObjectRequest>, JsonRejection>,
) -> Result<Json<ClassificationDecision>, AppError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    let (bucket, key) = match (non_empty(request.bucket), non_empty(request.key)) {
        (Some(bucket), Some(key)) => (bucket, key),
        _ => return Err(Error::invalid_request("Bucket and key are required").into()),
    };

    let fetcher = state.storage.as_ref().ok_or(Error::StorageUnavailable)?;
    let upload = fetcher
        .fetch(&bucket, &key, state.pipeline.config().max_upload_bytes)
        .await
        .map_err(reject)?;

    let decision = state.pipeline.run(upload).await?;
    Ok(Json(decision))
}

async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Log a rejection that happens before the pipeline runs
fn reject(err: Error) -> Error {
    ::metrics::counter!("frogcheck_outcomes_total", "outcome" => err.kind()).increment(1);
    warn!(kind = err.kind(), error = %err, "Request rejected");
    err
}

fn multipart_error(err: MultipartError, limit_bytes: u64) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        // The transport stops reading at its limit, so the true size is unknown
        return reject(Error::PayloadTooLarge {
            actual_bytes: limit_bytes.saturating_add(1),
            limit_bytes,
        });
    }
    warn!(detail = %err.body_text(), "Multipart parsing failed");
    reject(Error::invalid_request("Malformed multipart body"))
}
