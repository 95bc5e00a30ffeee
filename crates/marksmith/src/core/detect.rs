//! Format resolution: the single entry point combining signature and text
//! classification with the optional filename hint.
//!
//! Policy, in order:
//!
//! 1. Zero-length input is an error, never a format.
//! 2. The signature table is consulted first. A magic-byte match is final -
//!    an ASCII `%PDF-` prefix would also decode as UTF-8, so signatures must
//!    win over text decoding, and a `.txt`-named PDF stays a PDF.
//! 3. Payloads that decode as UTF-8 go to the text heuristics.
//! 4. Undecodable payloads with no signature fall back to `bin`, unless they
//!    are implausibly short to be a real binary file, which is rejected as
//!    bad input instead of silently accepted.
//! 5. A filename hint may upgrade the low-confidence `bin`/`txt` fallbacks,
//!    and nothing else.

use crate::core::{formats, signatures, text};
use crate::error::{MarksmithError, Result};
use crate::types::{ClassificationResult, ConfidenceSource, ContentKind};

/// Payloads below this length that fail both text decoding and every
/// signature are rejected as garbage rather than labeled `bin`.
const MIN_PLAUSIBLE_BINARY_LEN: usize = 8;

/// Classify a payload from content, with an optional filename hint.
///
/// Pure and deterministic: the same bytes always produce the same result.
///
/// # Errors
///
/// - [`MarksmithError::EmptyInput`] for a zero-length payload.
/// - [`MarksmithError::Validation`] for undecodable sub-8-byte payloads that
///   match no signature.
pub fn classify(bytes: &[u8], filename_hint: Option<&str>) -> Result<ClassificationResult> {
    if bytes.is_empty() {
        return Err(MarksmithError::EmptyInput);
    }

    if let Some((label, source)) = signatures::classify_binary(bytes) {
        return Ok(ClassificationResult::new(label, ContentKind::Binary, source));
    }

    if let Some(decoded) = text::decode_utf8(bytes) {
        let (label, source) = text::classify_text(decoded);
        let mut result = ClassificationResult::new(label, ContentKind::Text, source);
        apply_filename_hint(&mut result, filename_hint);
        return Ok(result);
    }

    if bytes.len() < MIN_PLAUSIBLE_BINARY_LEN {
        return Err(MarksmithError::validation(format!(
            "Content is {} bytes, matches no known signature and is not valid text",
            bytes.len()
        )));
    }

    let mut result = ClassificationResult::new("bin", ContentKind::Binary, ConfidenceSource::Fallback);
    apply_filename_hint(&mut result, filename_hint);
    Ok(result)
}

/// Upgrade a fallback label from a recognized filename extension.
///
/// Only the `bin` and `txt` fallbacks are eligible; the content kind is kept
/// from content inspection regardless of what the hint claims.
fn apply_filename_hint(result: &mut ClassificationResult, filename_hint: Option<&str>) {
    if !matches!(result.format_label.as_str(), "bin" | "txt") {
        return;
    }

    let Some(name) = filename_hint else {
        return;
    };

    let extension = match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => return,
    };

    if let Some(label) = formats::hint_label(&extension) {
        tracing::debug!(hint = %label, "upgrading fallback classification from filename extension");
        result.format_label = label.to_string();
        result.confidence_source = ConfidenceSource::FilenameHint;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_an_error() {
        let err = classify(b"", None).unwrap_err();
        assert!(matches!(err, MarksmithError::EmptyInput));
    }

    #[test]
    fn test_pdf_prefix_wins_over_text_decoding() {
        // The prefix is valid ASCII, but the signature must take priority.
        let result = classify(b"%PDF-1.4 fake body", None).unwrap();
        assert_eq!(result.format_label, "pdf");
        assert_eq!(result.content_kind, ContentKind::Binary);
        assert_eq!(result.confidence_source, ConfidenceSource::Signature);
    }

    #[test]
    fn test_signature_not_overridden_by_hint() {
        let result = classify(b"%PDF-1.4 fake body", Some("notes.txt")).unwrap();
        assert_eq!(result.format_label, "pdf");
        assert_eq!(result.confidence_source, ConfidenceSource::Signature);
    }

    #[test]
    fn test_text_payload_goes_to_heuristics() {
        let result = classify(b"{\"a\": 1}", None).unwrap();
        assert_eq!(result.format_label, "json");
        assert_eq!(result.content_kind, ContentKind::Text);
    }

    #[test]
    fn test_unmatched_binary_falls_back_to_bin() {
        let payload: Vec<u8> = (0..50u8).map(|i| 0x80 | i).collect();
        let result = classify(&payload, None).unwrap();
        assert_eq!(result.format_label, "bin");
        assert_eq!(result.content_kind, ContentKind::Binary);
        assert_eq!(result.confidence_source, ConfidenceSource::Fallback);
    }

    #[test]
    fn test_short_garbage_is_rejected() {
        let err = classify(&[0xFE, 0x80, 0x81], None).unwrap_err();
        assert!(matches!(err, MarksmithError::Validation { .. }));
    }

    #[test]
    fn test_hint_upgrades_bin_fallback() {
        let payload: Vec<u8> = (0..50u8).map(|i| 0x80 | i).collect();
        let result = classify(&payload, Some("scan.PDF")).unwrap();
        assert_eq!(result.format_label, "pdf");
        assert_eq!(result.content_kind, ContentKind::Binary);
        assert_eq!(result.confidence_source, ConfidenceSource::FilenameHint);
    }

    #[test]
    fn test_hint_upgrades_txt_fallback() {
        let result = classify(b"just some prose", Some("report.csv")).unwrap();
        assert_eq!(result.format_label, "csv");
        assert_eq!(result.content_kind, ContentKind::Text);
        assert_eq!(result.confidence_source, ConfidenceSource::FilenameHint);
    }

    #[test]
    fn test_hint_does_not_override_heuristic_match() {
        let result = classify(b"# Title\n\nbody", Some("file.csv")).unwrap();
        assert_eq!(result.format_label, "md");
        assert_eq!(result.confidence_source, ConfidenceSource::Heuristic);
    }

    #[test]
    fn test_unrecognized_hint_extension_ignored() {
        let payload: Vec<u8> = (0..50u8).map(|i| 0x80 | i).collect();
        let result = classify(&payload, Some("payload.exe")).unwrap();
        assert_eq!(result.format_label, "bin");
        assert_eq!(result.confidence_source, ConfidenceSource::Fallback);
    }

    #[test]
    fn test_hint_without_extension_ignored() {
        let result = classify(b"plain words", Some("README")).unwrap();
        assert_eq!(result.format_label, "txt");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let payloads: [&[u8]; 4] = [b"%PDF-1.4", b"{\"a\":1}", b"a,b\n1,2\n", b"\x80\x81\x82\x83\x84\x85\x86\x87\x88"];
        for payload in payloads {
            let first = classify(payload, None).unwrap();
            for _ in 0..5 {
                assert_eq!(classify(payload, None).unwrap(), first);
            }
        }
    }
}
