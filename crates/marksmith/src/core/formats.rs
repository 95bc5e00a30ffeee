//! Format catalog: the discovery surface of the classification engine.
//!
//! Two views over the same label universe: everything the classifier can
//! *detect* from content, and the narrower subset the downstream converter
//! can actually *convert* to Markdown. Callers use the split to distinguish
//! "detected but not convertible" from "convertible" before (or after)
//! attempting a conversion.

use ahash::AHashSet;
use once_cell::sync::Lazy;

/// A named group of format labels, as exposed by the `/formats` endpoint.
#[derive(Debug, Clone, Copy)]
pub struct FormatCategory {
    pub name: &'static str,
    pub labels: &'static [&'static str],
}

/// Every label the engine can detect from content, by category.
///
/// The `web` pseudo-formats are URL payloads recognized by the converter
/// itself rather than by byte inspection; they are listed for parity with the
/// conversion surface.
pub const DETECTABLE: &[FormatCategory] = &[
    FormatCategory {
        name: "documents",
        labels: &["pdf", "docx", "xlsx", "pptx", "html", "txt", "rtf", "epub"],
    },
    FormatCategory {
        name: "images",
        labels: &["jpg", "jpeg", "png", "gif", "bmp", "ico", "webp", "tiff"],
    },
    FormatCategory {
        name: "audio",
        labels: &["wav", "mp3", "m4a", "flac", "ogg"],
    },
    FormatCategory {
        name: "text_data",
        labels: &["csv", "json", "xml", "tsv", "md"],
    },
    FormatCategory {
        name: "archives",
        labels: &["zip", "tar", "gz", "bz2", "xz", "7z"],
    },
    FormatCategory {
        name: "web",
        labels: &["http_urls", "https_urls"],
    },
];

/// The subset of [`DETECTABLE`] the external converter accepts.
pub const CONVERTIBLE: &[FormatCategory] = &[
    FormatCategory {
        name: "documents",
        labels: &["pdf", "docx", "xlsx", "pptx", "html", "txt", "rtf", "epub"],
    },
    FormatCategory {
        name: "images",
        labels: &["jpg", "jpeg", "png", "gif", "bmp", "ico", "webp", "tiff"],
    },
    FormatCategory {
        name: "audio",
        labels: &["wav", "mp3", "m4a", "flac", "ogg"],
    },
    FormatCategory {
        name: "text_data",
        labels: &["csv", "tsv", "md"],
    },
    FormatCategory {
        name: "archives",
        labels: &["zip"],
    },
    FormatCategory {
        name: "web",
        labels: &["http_urls", "https_urls"],
    },
];

/// Labels the engine detects but the converter rejects.
pub const DETECTION_ONLY: &[&str] = &["json", "xml", "tar", "gz", "bz2", "xz", "7z"];

/// Convertible alternatives suggested alongside unsupported-format errors.
pub const SUGGESTED_ALTERNATIVES: &[&str] = &["pdf", "docx", "xlsx", "pptx", "html", "csv", "tsv", "md"];

fn category_set(categories: &[FormatCategory]) -> AHashSet<&'static str> {
    categories.iter().flat_map(|category| category.labels).copied().collect()
}

/// Cached label sets for O(1) membership checks.
static DETECTABLE_SET: Lazy<AHashSet<&'static str>> = Lazy::new(|| category_set(DETECTABLE));
static CONVERTIBLE_SET: Lazy<AHashSet<&'static str>> = Lazy::new(|| category_set(CONVERTIBLE));

/// Filename-hint allowlist: extensions a caller-supplied filename may
/// contribute when content inspection only produced a fallback label.
/// Archive and URL labels are deliberately absent - an archive hint on
/// unrecognized bytes is more likely wrong than right.
static HINT_EXTENSIONS: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    DETECTABLE
        .iter()
        .filter(|category| !matches!(category.name, "archives" | "web"))
        .flat_map(|category| category.labels)
        .copied()
        .collect()
});

/// Whether the classifier can produce this label (catalog view).
pub fn is_detectable(label: &str) -> bool {
    DETECTABLE_SET.contains(label)
}

/// Whether the downstream converter accepts this label.
pub fn is_convertible(label: &str) -> bool {
    CONVERTIBLE_SET.contains(label)
}

/// Resolve a filename extension to a hint label, if allowed.
pub fn hint_label(extension: &str) -> Option<&'static str> {
    HINT_EXTENSIONS.get(extension).copied()
}

/// The temporary-file suffix handed to the external converter for a label.
pub fn temp_suffix(label: &str) -> String {
    format!(".{label}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convertible_is_subset_of_detectable() {
        for category in CONVERTIBLE {
            for label in category.labels {
                assert!(is_detectable(label), "convertible label {label} missing from catalog");
            }
        }
    }

    #[test]
    fn test_detection_only_labels_not_convertible() {
        for label in DETECTION_ONLY {
            assert!(is_detectable(label), "{label} should be detectable");
            assert!(!is_convertible(label), "{label} should not be convertible");
        }
    }

    #[test]
    fn test_no_duplicate_labels_per_view() {
        let mut seen = std::collections::HashSet::new();
        for category in DETECTABLE {
            for label in category.labels {
                assert!(seen.insert(label), "duplicate detectable label: {label}");
            }
        }
    }

    #[test]
    fn test_hint_allowlist() {
        assert_eq!(hint_label("pdf"), Some("pdf"));
        assert_eq!(hint_label("jpeg"), Some("jpeg"));
        assert_eq!(hint_label("csv"), Some("csv"));
        assert_eq!(hint_label("zip"), None);
        assert_eq!(hint_label("http_urls"), None);
        assert_eq!(hint_label("exe"), None);
    }

    #[test]
    fn test_temp_suffix() {
        assert_eq!(temp_suffix("pdf"), ".pdf");
        assert_eq!(temp_suffix("bin"), ".bin");
    }

    #[test]
    fn test_suggested_alternatives_are_convertible() {
        for label in SUGGESTED_ALTERNATIVES {
            assert!(is_convertible(label));
        }
    }
}
