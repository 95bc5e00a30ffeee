//! Conversion façade: the boundary to the external document converter.
//!
//! The classification core never decodes document content itself; it hands
//! the classified payload to an external converter through this trait. The
//! call is potentially slow and resource-bounded, so it is the only async
//! step in the request flow. Failures are classified, never retried, and
//! surfaced with the attempted format label attached.

mod subprocess;

pub use subprocess::MarkitdownConverter;

use async_trait::async_trait;

use crate::Result;

/// External document-to-Markdown conversion boundary.
///
/// Implementations receive the raw payload plus the format label chosen by
/// the classifier and return extracted Markdown text. The HTTP layer and CLI
/// depend only on this trait, so tests can inject a stub.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Convert a classified payload into Markdown.
    ///
    /// # Errors
    ///
    /// - [`crate::MarksmithError::UnsupportedFormat`] when the converter
    ///   rejects a correctly-detected format
    /// - [`crate::MarksmithError::Conversion`] for other converter failures
    ///   (the cause is preserved)
    /// - [`crate::MarksmithError::Io`] when the converter cannot be spawned
    async fn convert(&self, bytes: &[u8], format_label: &str) -> Result<String>;
}
