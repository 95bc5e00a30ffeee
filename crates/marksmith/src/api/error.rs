//! API error mapping.
//!
//! Classification-layer errors are client errors (400), a correctly-detected
//! but unconvertible format is 422 with the attempted label and convertible
//! alternatives attached, and converter/system failures are 500. The cause
//! is surfaced unchanged in the message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::core::formats;
use crate::error::MarksmithError;

use super::types::ErrorResponse;

/// Error wrapper carrying the HTTP status alongside the library error.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: MarksmithError,
}

impl ApiError {
    /// Wrap an error as a 400 Bad Request.
    pub fn validation(error: MarksmithError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// Wrap an error as a 500 Internal Server Error.
    pub fn internal(error: MarksmithError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }

    fn error_type(&self) -> &'static str {
        match &self.error {
            MarksmithError::Io(_) => "io",
            MarksmithError::EmptyInput => "empty_input",
            MarksmithError::Validation { .. } => "validation",
            MarksmithError::UnsupportedFormat(_) => "unsupported_format",
            MarksmithError::Conversion { .. } => "conversion",
            MarksmithError::Serialization { .. } => "serialization",
            MarksmithError::Other(_) => "other",
        }
    }
}

impl From<MarksmithError> for ApiError {
    fn from(error: MarksmithError) -> Self {
        let status = match &error {
            MarksmithError::EmptyInput | MarksmithError::Validation { .. } => StatusCode::BAD_REQUEST,
            MarksmithError::UnsupportedFormat(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = ErrorResponse {
            error_type: self.error_type().to_string(),
            message: self.error.to_string(),
            status_code: self.status.as_u16(),
            detected_format: None,
            suggestion: None,
            supported_alternatives: None,
        };

        if let MarksmithError::UnsupportedFormat(label) = &self.error {
            body.detected_format = Some(label.clone());
            body.suggestion = Some(
                "This format is detected but not supported by the converter. \
                 Check GET /formats for supported vs detection-only formats."
                    .to_string(),
            );
            body.supported_alternatives = Some(
                formats::SUGGESTED_ALTERNATIVES
                    .iter()
                    .map(|label| label.to_string())
                    .collect(),
            );
        }

        if self.status.is_server_error() {
            tracing::error!(error = %self.error, "request failed");
        } else {
            tracing::debug!(error = %self.error, status = %self.status, "request rejected");
        }

        (self.status, Json(body)).into_response()
    }
}
