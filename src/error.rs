use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Could not extract search id from Location header. Received: {0}")]
    Extraction(String),

    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Offers not ready after {attempts} polling attempts")]
    PollTimeout { attempts: u32 },

    #[error("Offers polling failed with status {status}: {body}")]
    PollFailed { status: u16, body: String },

    #[error("Upstream request timed out: {0}")]
    NetworkTimeout(String),

    #[error("Network error calling upstream: {0}")]
    Network(String),

    #[error("Invalid JSON from upstream: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

pub type Result<T> = std::result::Result<T, ProxyError>;

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::NetworkTimeout(err.to_string())
        } else {
            ProxyError::Network(err.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ProxyError::Extraction(location) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Could not reliably extract search id from Location header",
                    "details": location,
                })),
            )
                .into_response(),
            ProxyError::Upstream { status, body } => {
                relay_upstream(status, &body, "Upstream API error")
            }
            ProxyError::PollFailed { status, body } => {
                relay_upstream(status, &body, "Failed to get offers")
            }
            ProxyError::PollTimeout { attempts } => (
                StatusCode::GATEWAY_TIMEOUT,
                Json(json!({
                    "error": "Offers polling timed out",
                    "details": format!("No result after {attempts} attempts"),
                })),
            )
                .into_response(),
            ProxyError::NetworkTimeout(details) => (
                StatusCode::GATEWAY_TIMEOUT,
                Json(json!({ "error": "Upstream request timed out", "details": details })),
            )
                .into_response(),
            ProxyError::Network(details) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "Network error calling upstream", "details": details })),
            )
                .into_response(),
            ProxyError::Json(err) => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "Invalid JSON from upstream", "details": err.to_string() })),
            )
                .into_response(),
            ProxyError::Database(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Database error: {err}") })),
            )
                .into_response(),
        }
    }
}

/// Relay an upstream status and body to the client. Bodies that parse as a
/// JSON object are re-emitted verbatim; anything else is wrapped in a
/// generic error envelope with a `details` field.
pub fn relay_upstream(status: u16, body: &str, fallback_error: &str) -> Response {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    match serde_json::from_str::<Value>(body) {
        Ok(value) if value.is_object() => (code, Json(value)).into_response(),
        _ => (
            code,
            Json(json!({ "error": fallback_error, "details": body })),
        )
            .into_response(),
    }
}
