//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use frogcheck_core::Error;
use serde_json::json;
use tracing::debug;

/// Pipeline error rendered as `{ "error": { "message", "type" } }`
#[derive(Debug)]
pub struct AppError(pub Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        debug!(%status, error = %self.0, "Returning error response");

        let body = json!({
            "error": {
                "message": self.0.public_message(),
                "type": self.0.kind(),
            }
        });

        (status, Json(body)).into_response()
    }
}
