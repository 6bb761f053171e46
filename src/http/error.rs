//! Handler error definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while handling an event delivery.
///
/// Every variant renders as an opaque 500: the cause goes to the log,
/// never to the client.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The form body carried no `payload` field.
    #[error("form body has no payload field")]
    MissingPayload,

    /// The `payload` field was not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "event handler failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}
