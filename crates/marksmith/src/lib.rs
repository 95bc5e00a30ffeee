//! Marksmith - Content-Sniffing Document Conversion Service
//!
//! Marksmith accepts arbitrary document bytes, determines the file format
//! from content alone, and hands the payload to an external
//! document-to-Markdown converter. The classification engine covers
//! magic-byte signatures, container disambiguation (ZIP-based Office/EPUB
//! formats, RIFF-based WAV/AVI/WebP) and structural heuristics for
//! plain-text formats that have no magic bytes (JSON, XML, HTML, CSV/TSV,
//! Markdown).
//!
//! # Quick Start
//!
//! ```rust
//! use marksmith::{classify, ContentKind};
//!
//! # fn main() -> marksmith::Result<()> {
//! let result = classify(b"{\"a\": 1, \"b\": [1,2,3]}", None)?;
//! assert_eq!(result.format_label, "json");
//! assert_eq!(result.content_kind, ContentKind::Text);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): signature table, text heuristics, format
//!   resolver, format catalog, configuration
//! - **Conversion** (`conversion`): the external converter boundary
//!   (trait + markitdown subprocess implementation)
//! - **API** (`api`): Axum HTTP server exposing the conversion flow
//!
//! # Features
//!
//! - Pure, lock-free classification safe for unbounded concurrency
//! - Detection/conversion capability split exposed for discovery
//! - Filename hints that refine low-confidence results without ever
//!   overriding a magic-byte match

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod types;

#[cfg(feature = "tokio-runtime")]
pub mod conversion;

#[cfg(feature = "api")]
pub mod api;

pub use error::{MarksmithError, Result};
pub use types::*;

pub use core::config::ConversionConfig;
pub use core::detect::classify;
pub use core::formats::{DETECTABLE, DETECTION_ONLY, is_convertible, is_detectable};

#[cfg(feature = "tokio-runtime")]
pub use conversion::{DocumentConverter, MarkitdownConverter};
