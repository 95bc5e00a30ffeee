//! Structural heuristics for text payloads.
//!
//! Plain-text formats have no magic bytes, so classification relies on an
//! explicit ordered list of pure predicates, evaluated most-unambiguous
//! first: JSON and XML/HTML have strict syntax and are checked before the
//! looser CSV/TSV and Markdown heuristics, so a Markdown document that
//! happens to contain a comma-separated line is not misread as CSV.

use crate::types::ConfidenceSource;

/// Number of leading non-empty lines sampled by the CSV/TSV heuristic.
const DELIMITED_SAMPLE_LINES: usize = 5;

/// Decode a payload as UTF-8, if possible.
///
/// Uses SIMD-accelerated validation when the `simd-utf8` feature is enabled.
pub fn decode_utf8(bytes: &[u8]) -> Option<&str> {
    #[cfg(feature = "simd-utf8")]
    {
        simdutf8::basic::from_utf8(bytes).ok()
    }
    #[cfg(not(feature = "simd-utf8"))]
    {
        std::str::from_utf8(bytes).ok()
    }
}

/// Classify decoded text into a format label.
///
/// Precedence: JSON, XML/HTML, CSV/TSV, Markdown, then the `txt` fallback.
/// Whitespace-only content falls through to `txt`.
pub fn classify_text(text: &str) -> (&'static str, ConfidenceSource) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ("txt", ConfidenceSource::Fallback);
    }

    if is_json(trimmed) {
        return ("json", ConfidenceSource::Heuristic);
    }

    if let Some(label) = detect_markup(trimmed) {
        return (label, ConfidenceSource::Heuristic);
    }

    if let Some(label) = detect_delimited(trimmed) {
        return (label, ConfidenceSource::Heuristic);
    }

    if is_markdown(trimmed) {
        return ("md", ConfidenceSource::Heuristic);
    }

    ("txt", ConfidenceSource::Fallback)
}

/// A complete JSON document with an object or array root.
fn is_json(trimmed: &str) -> bool {
    let object_root = trimmed.starts_with('{') && trimmed.ends_with('}');
    let array_root = trimmed.starts_with('[') && trimmed.ends_with(']');
    if !object_root && !array_root {
        return false;
    }
    serde_json::from_str::<serde::de::IgnoredAny>(trimmed).is_ok()
}

/// XML and HTML detection for content opening with an angle bracket.
fn detect_markup(trimmed: &str) -> Option<&'static str> {
    if !trimmed.starts_with('<') {
        return None;
    }

    let lower = trimmed.to_lowercase();
    if lower.starts_with("<?xml") {
        return Some("xml");
    }

    const HTML_MARKERS: &[&str] = &["<!doctype html", "<html", "<head", "<body", "<div", "<p>", "<p ", "<span"];
    if HTML_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return Some("html");
    }

    // Generic tag opening with at least one closing tag.
    if lower.contains("</") {
        return Some("xml");
    }

    None
}

/// CSV/TSV detection over a sampled prefix of lines.
///
/// Requires at least two non-empty lines whose separator counts are identical
/// and nonzero. When both separators are consistent, CSV wins only if commas
/// outnumber tabs.
fn detect_delimited(text: &str) -> Option<&'static str> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(DELIMITED_SAMPLE_LINES)
        .collect();

    if lines.len() < 2 {
        return None;
    }

    let commas = consistent_separator_count(&lines, ',');
    let tabs = consistent_separator_count(&lines, '\t');

    match (commas, tabs) {
        (Some(commas), Some(tabs)) => Some(if commas > tabs { "csv" } else { "tsv" }),
        (Some(_), None) => Some("csv"),
        (None, Some(_)) => Some("tsv"),
        (None, None) => None,
    }
}

/// The separator count shared by every sampled line, if consistent and > 0.
fn consistent_separator_count(lines: &[&str], separator: char) -> Option<usize> {
    let first = lines[0].matches(separator).count();
    if first == 0 {
        return None;
    }
    lines
        .iter()
        .all(|line| line.matches(separator).count() == first)
        .then_some(first)
}

/// Recognizable Markdown syntax: ATX headers or list markers at line start,
/// fenced code blocks, emphasis, or link syntax anywhere.
fn is_markdown(text: &str) -> bool {
    const LINE_MARKERS: &[&str] = &["# ", "## ", "### ", "#### ", "- ", "* ", "+ ", "```"];

    for line in text.lines() {
        let line = line.trim_start();
        if LINE_MARKERS.iter().any(|marker| line.starts_with(marker)) {
            return true;
        }
        if is_ordered_list_item(line) {
            return true;
        }
    }

    text.contains("**") || text.contains("__") || text.contains("](")
}

/// `1. `-style ordered list marker at line start.
fn is_ordered_list_item(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with(". ")
}
