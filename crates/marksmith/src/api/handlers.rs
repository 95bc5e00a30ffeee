//! API request handlers.

use axum::{Json, body::Bytes, extract::State};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::core::detect::classify;
use crate::error::MarksmithError;
use crate::types::{ClassificationResult, ConversionOutcome};

use super::{
    error::ApiError,
    types::{ApiState, Base64ConvertRequest, EndpointCatalog, FormatsResponse, HealthResponse, RootResponse},
};

/// Convert endpoint handler.
///
/// POST /convert
///
/// Accepts raw document bytes in the request body, classifies them from
/// content, and returns the converted Markdown. The request body size limit
/// is enforced at the router layer; oversized requests are rejected with
/// HTTP 413 before reaching this handler.
pub async fn convert_handler(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<ConversionOutcome>, ApiError> {
    let classification = classify(&body, None)?;
    let outcome = run_conversion(&state, &body, classification, None).await?;
    Ok(Json(outcome))
}

/// Base64 convert endpoint handler.
///
/// POST /convert-base64
///
/// Accepts a JSON payload with base64-encoded file content and an optional
/// filename. The filename only contributes when content inspection produced
/// a low-confidence fallback label.
pub async fn convert_base64_handler(
    State(state): State<ApiState>,
    Json(request): Json<Base64ConvertRequest>,
) -> Result<Json<ConversionOutcome>, ApiError> {
    if request.content.is_empty() {
        return Err(MarksmithError::validation("No base64 content provided").into());
    }

    let raw = BASE64
        .decode(request.content.as_bytes())
        .map_err(|e| MarksmithError::validation_with_source("Invalid base64 content", e))?;

    let classification = classify(&raw, request.filename.as_deref())?;
    let outcome = run_conversion(&state, &raw, classification, request.filename).await?;
    Ok(Json(outcome))
}

/// Classification and conversion shared by both convert endpoints.
async fn run_conversion(
    state: &ApiState,
    bytes: &[u8],
    classification: ClassificationResult,
    original_filename: Option<String>,
) -> Result<ConversionOutcome, ApiError> {
    // Whitespace-only text classifies as txt but has nothing to convert.
    if classification.content_kind.is_text()
        && std::str::from_utf8(bytes).map(|text| text.trim().is_empty()).unwrap_or(false)
    {
        return Err(MarksmithError::validation("Empty content provided").into());
    }

    tracing::info!(
        format = %classification.format_label,
        kind = ?classification.content_kind,
        bytes = bytes.len(),
        "classified payload"
    );

    let converted = state.converter.convert(bytes, &classification.format_label).await?;
    let converted_length = converted.chars().count();

    tracing::info!(
        format = %classification.format_label,
        original = bytes.len(),
        converted = converted_length,
        "conversion finished"
    );

    Ok(ConversionOutcome {
        success: true,
        detected_format: classification.format_label,
        original_filename,
        original_length: bytes.len(),
        converted_content: converted,
        converted_length,
        content_type: classification.content_kind,
    })
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Service banner handler.
///
/// GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Marksmith conversion server is running".to_string(),
        status: "healthy".to_string(),
        endpoints: EndpointCatalog {
            convert: "POST /convert - Upload raw binary file content".to_string(),
            convert_base64: "POST /convert-base64 - Upload base64-encoded file content with optional filename"
                .to_string(),
            formats: "GET /formats - List supported file formats".to_string(),
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Format discovery endpoint handler.
///
/// GET /formats
///
/// Lists every label the classifier can detect next to the subset the
/// external converter can actually convert, so callers can distinguish
/// "detected but not convertible" from "convertible".
pub async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse::current())
}
