//! HTTP error types for the relay server.
//!
//! Maps validation and provider errors into the relay's response contract:
//! `{ "error": "...", "details"?: "..." }`. Provider detail is logged here
//! and never placed in the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use leadrelay_core::{FieldErrors, ProviderError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// The body was not a valid Lead Submission. Details are safe to show.
    BadRequest(String),
    /// The provider answered and refused the submission.
    DeliveryFailed(String),
    /// Anything else that went wrong while handling the request.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            Self::BadRequest(details) => {
                (StatusCode::BAD_REQUEST, "Invalid submission", Some(details))
            }
            Self::DeliveryFailed(detail) => {
                tracing::error!(error = %detail, "provider refused submission");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email", None)
            }
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "contact relay error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        };

        (status, axum::Json(ErrorBody { error, details })).into_response()
    }
}

impl From<FieldErrors> for AppError {
    fn from(err: FieldErrors) -> Self {
        Self::BadRequest(err.summary())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { .. } => Self::DeliveryFailed(err.to_string()),
            ProviderError::Config { .. }
            | ProviderError::Transport { .. }
            | ProviderError::InvalidResponse { .. } => Self::Internal(err.to_string()),
        }
    }
}
