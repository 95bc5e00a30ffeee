//! Error types for Marksmith.
//!
//! All fallible operations in the library return [`Result`], built on
//! [`MarksmithError`]. The taxonomy follows a few rules:
//!
//! - **System errors bubble up unchanged**: `MarksmithError::Io` wraps
//!   `std::io::Error` and is never masked - a missing converter binary or a
//!   failed temp-file write must surface as what it is.
//! - **Classification-layer errors are local and deterministic**: empty
//!   payloads and undecodable short garbage are rejected synchronously,
//!   before any conversion work happens.
//! - **Converter errors keep their cause**: a failed external conversion is
//!   wrapped with the format label that was attempted, so callers can act on
//!   it, but the underlying message is preserved.
//!
//! Nothing is retried automatically. Classification is a pure function, so a
//! retry would reproduce the same result; conversion failures are not retried
//! either, to avoid masking genuinely malformed documents.
use thiserror::Error;

/// Result type alias using `MarksmithError`.
pub type Result<T> = std::result::Result<T, MarksmithError>;

/// Main error type for all Marksmith operations.
///
/// # Variants
///
/// - `Io` - File system and subprocess spawn errors (always bubble up)
/// - `EmptyInput` - Zero-length payload, rejected before classification
/// - `Validation` - Bad input: invalid base64, whitespace-only text,
///   undecodable short garbage
/// - `UnsupportedFormat` - The external converter rejected a format the
///   classifier detected correctly
/// - `Conversion` - The external converter failed for an otherwise
///   well-classified input
/// - `Serialization` - JSON serialization errors
/// - `Other` - Catch-all for uncommon errors
#[derive(Debug, Error)]
pub enum MarksmithError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty input: no content provided")]
    EmptyInput,

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Conversion failed for '{label}': {message}")]
    Conversion {
        label: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for MarksmithError {
    fn from(err: serde_json::Error) -> Self {
        MarksmithError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl MarksmithError {
    /// Create a Validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Validation error with source.
    pub fn validation_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Conversion error carrying the attempted format label.
    pub fn conversion<L: Into<String>, S: Into<String>>(label: L, message: S) -> Self {
        Self::Conversion {
            label: label.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a Conversion error with source.
    pub fn conversion_with_source<L, S, E>(label: L, message: S, source: E) -> Self
    where
        L: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Conversion {
            label: label.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
