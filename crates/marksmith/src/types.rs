//! Core data types shared across the classification engine and the
//! conversion flow.
//!
//! Everything here is request-scoped: created for one payload, serialized
//! into the response, and discarded. The only process-wide data lives in
//! [`crate::core::signatures`] and [`crate::core::formats`], both read-only.

use serde::{Deserialize, Serialize};

/// Whether a payload is handed to the converter as decoded text or as a
/// binary file with an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Binary,
}

impl ContentKind {
    pub fn is_text(self) -> bool {
        matches!(self, ContentKind::Text)
    }
}

/// How a classification was reached.
///
/// A `Signature` match is final and can never be overridden by a filename
/// hint; `Fallback` marks the low-confidence `bin`/`txt` labels that a hint
/// may upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceSource {
    Signature,
    Heuristic,
    FilenameHint,
    Fallback,
}

/// The outcome of classifying one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Short canonical format label, e.g. `pdf`, `docx`, `csv`.
    pub format_label: String,
    /// Text/binary partition used to choose how the converter receives the
    /// payload.
    pub content_kind: ContentKind,
    /// How the label was determined.
    pub confidence_source: ConfidenceSource,
}

impl ClassificationResult {
    pub fn new(format_label: impl Into<String>, content_kind: ContentKind, confidence_source: ConfidenceSource) -> Self {
        Self {
            format_label: format_label.into(),
            content_kind,
            confidence_source,
        }
    }
}

/// The shape of a successful conversion, as returned to API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutcome {
    /// Always `true` for a response that made it out of the converter.
    pub success: bool,
    /// Format label the classifier assigned before conversion.
    pub detected_format: String,
    /// Original filename, when the caller supplied one (base64 endpoint).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    /// Payload size in bytes as received.
    pub original_length: usize,
    /// Converted Markdown text.
    pub converted_content: String,
    /// Length of the converted text in characters.
    pub converted_length: usize,
    /// Text/binary partition the payload was classified into.
    pub content_type: ContentKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ContentKind::Text).unwrap(), "\"text\"");
        assert_eq!(serde_json::to_string(&ContentKind::Binary).unwrap(), "\"binary\"");
    }

    #[test]
    fn test_confidence_source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ConfidenceSource::FilenameHint).unwrap(),
            "\"filename_hint\""
        );
        assert_eq!(serde_json::to_string(&ConfidenceSource::Signature).unwrap(), "\"signature\"");
    }

    #[test]
    fn test_classification_result_roundtrip() {
        let result = ClassificationResult::new("pdf", ContentKind::Binary, ConfidenceSource::Signature);
        let json = serde_json::to_string(&result).unwrap();
        let back: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_conversion_outcome_omits_missing_filename() {
        let outcome = ConversionOutcome {
            success: true,
            detected_format: "md".to_string(),
            original_filename: None,
            original_length: 10,
            converted_content: "# hi".to_string(),
            converted_length: 4,
            content_type: ContentKind::Text,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(!json.contains("original_filename"));
    }
}
