//! API request and response types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::conversion::DocumentConverter;
use crate::core::formats::{self, FormatCategory};

/// API server size limit configuration.
///
/// Controls the maximum request body size. The default is 100 MB, sized for
/// typical document payloads.
///
/// # Configuration via Environment Variables
///
/// ```bash
/// # Modern approach (in bytes):
/// export MARKSMITH_MAX_REQUEST_BODY_BYTES=104857600  # 100 MB
///
/// # Legacy approach (in MB):
/// export MARKSMITH_MAX_UPLOAD_SIZE_MB=100
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiSizeLimits {
    /// Maximum size of the request body in bytes.
    pub max_request_body_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self {
            max_request_body_bytes: 100 * 1024 * 1024,
        }
    }
}

impl ApiSizeLimits {
    /// Create size limits with a custom byte count.
    pub fn new(max_request_body_bytes: usize) -> Self {
        Self { max_request_body_bytes }
    }

    /// Create size limits from an MB value (convenience method).
    pub fn from_mb(max_request_body_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
        }
    }
}

/// API server state.
///
/// Holds the conversion façade behind a trait object so tests (and embedders)
/// can inject their own converter.
#[derive(Clone)]
pub struct ApiState {
    pub converter: Arc<dyn DocumentConverter>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// API version
    pub version: String,
}

/// Service banner returned from the root endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub endpoints: EndpointCatalog,
    pub version: String,
}

/// Human-readable endpoint map for the root banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointCatalog {
    pub convert: String,
    pub convert_base64: String,
    pub formats: String,
}

/// Request body for the base64 conversion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Base64ConvertRequest {
    /// Base64-encoded file content.
    pub content: String,
    /// Optional original filename, used as a low-confidence format hint.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Format labels grouped by category, in catalog order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMap {
    pub documents: Vec<String>,
    pub images: Vec<String>,
    pub audio: Vec<String>,
    pub text_data: Vec<String>,
    pub archives: Vec<String>,
    pub web: Vec<String>,
}

impl CategoryMap {
    pub(crate) fn from_categories(categories: &[FormatCategory]) -> Self {
        fn labels(categories: &[FormatCategory], name: &str) -> Vec<String> {
            categories
                .iter()
                .find(|category| category.name == name)
                .map(|category| category.labels.iter().map(|label| label.to_string()).collect())
                .unwrap_or_default()
        }

        Self {
            documents: labels(categories, "documents"),
            images: labels(categories, "images"),
            audio: labels(categories, "audio"),
            text_data: labels(categories, "text_data"),
            archives: labels(categories, "archives"),
            web: labels(categories, "web"),
        }
    }
}

/// Formats the engine can detect from content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionCapabilities {
    pub description: String,
    pub total_detectable: usize,
    pub categories: CategoryMap,
}

/// Formats the converter detects but cannot convert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionOnly {
    pub description: String,
    pub formats: Vec<String>,
}

/// Formats the external converter can actually turn into Markdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSupport {
    pub description: String,
    pub fully_supported: CategoryMap,
    pub detection_only: DetectionOnly,
}

/// Caveats surfaced alongside the format listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatNotes {
    pub images_audio: String,
    pub archives: String,
}

/// `GET /formats` response: detection vs conversion capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub detection_capabilities: DetectionCapabilities,
    pub conversion_support: ConversionSupport,
    pub notes: FormatNotes,
}

impl FormatsResponse {
    pub(crate) fn current() -> Self {
        let detectable = CategoryMap::from_categories(formats::DETECTABLE);
        let total_detectable = formats::DETECTABLE.iter().map(|category| category.labels.len()).sum();

        Self {
            detection_capabilities: DetectionCapabilities {
                description: "Formats the server can automatically detect from file content".to_string(),
                total_detectable,
                categories: detectable,
            },
            conversion_support: ConversionSupport {
                description: "Formats the converter can actually turn into markdown".to_string(),
                fully_supported: CategoryMap::from_categories(formats::CONVERTIBLE),
                detection_only: DetectionOnly {
                    description: "Detected but not convertible".to_string(),
                    formats: formats::DETECTION_ONLY.iter().map(|label| label.to_string()).collect(),
                },
            },
            notes: FormatNotes {
                images_audio: "Image and audio conversion quality depends on the external converter's OCR/transcription support".to_string(),
                archives: "ZIP files are converted, compressed archives are detected only".to_string(),
            },
        }
    }
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type name
    pub error_type: String,
    /// Error message
    pub message: String,
    /// HTTP status code
    pub status_code: u16,
    /// Format label the classifier assigned, for unsupported-format errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_format: Option<String>,
    /// Actionable hint, for unsupported-format errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Convertible alternatives, for unsupported-format errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_alternatives: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size_limits() {
        let limits = ApiSizeLimits::default();
        assert_eq!(limits.max_request_body_bytes, 100 * 1024 * 1024);
    }

    #[test]
    fn test_size_limits_from_mb() {
        let limits = ApiSizeLimits::from_mb(50);
        assert_eq!(limits.max_request_body_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn test_formats_response_counts_catalog() {
        let response = FormatsResponse::current();
        assert_eq!(response.detection_capabilities.categories.documents.len(), 8);
        assert!(response.detection_capabilities.total_detectable >= 32);
        assert_eq!(response.conversion_support.fully_supported.text_data, vec!["csv", "tsv", "md"]);
        assert!(response.conversion_support.detection_only.formats.contains(&"json".to_string()));
    }

    #[test]
    fn test_base64_request_filename_optional() {
        let request: Base64ConvertRequest = serde_json::from_str("{\"content\": \"aGVsbG8=\"}").unwrap();
        assert!(request.filename.is_none());
    }
}
