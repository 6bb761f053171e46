//! Route handlers for the two webhook endpoints.

use axum::body::Bytes;
use serde_json::Value;

use crate::http::error::HandlerError;

/// `POST /` — fixed greeting, body never read.
pub async fn root() -> &'static str {
    "hello world"
}

/// `POST /event_handler` — decode the form body, JSON-parse the `payload`
/// field, discard the value, acknowledge.
///
/// The body is decoded as urlencoded pairs regardless of the declared
/// content type. A missing field or a parse failure propagates as a
/// [`HandlerError`] and renders as the generic 500.
pub async fn event_handler(body: Bytes) -> Result<&'static str, HandlerError> {
    let payload = last_payload_field(&body).ok_or(HandlerError::MissingPayload)?;

    // Parsed only to prove it is JSON; the value itself is not used.
    let _value: Value = serde_json::from_str(&payload)?;

    tracing::debug!(payload_bytes = payload.len(), "event payload parsed");
    Ok("Well, it worked!")
}

/// Extract the last `payload` field from a urlencoded body.
///
/// Last-wins on repeated fields, matching form query-merge semantics.
fn last_payload_field(body: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(body)
        .filter(|(key, _)| key == "payload")
        .map(|(_, value)| value.into_owned())
        .last()
}
