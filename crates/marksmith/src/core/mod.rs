//! Core classification engine.
//!
//! This module contains the content-type classification logic and its
//! supporting registries:
//!
//! - **Signatures** (`signatures`): the static magic-byte table, container
//!   disambiguation (ZIP sub-formats, RIFF FourCC) and TAR detection
//! - **Text heuristics** (`text`): structural detection of JSON, XML/HTML,
//!   CSV/TSV and Markdown in decoded text
//! - **Resolver** (`detect`): the `classify()` entry point combining both
//!   classifiers with the filename-hint policy
//! - **Catalog** (`formats`): the discovery surface of detectable vs
//!   convertible format labels
//! - **Configuration** (`config`): converter settings and file discovery
//!
//! Classification is a pure, synchronous, CPU-bound computation over an
//! in-memory buffer. It performs no I/O, holds no per-request state, and the
//! static tables are safe for unsynchronized concurrent reads, so arbitrarily
//! many payloads may classify concurrently without locking.
//!
//! # Example
//!
//! ```rust
//! use marksmith::{classify, ContentKind};
//!
//! # fn main() -> marksmith::Result<()> {
//! let result = classify(b"%PDF-1.7 ...", None)?;
//! assert_eq!(result.format_label, "pdf");
//! assert_eq!(result.content_kind, ContentKind::Binary);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod detect;
pub mod formats;
pub mod signatures;
pub mod text;

pub use config::ConversionConfig;
pub use detect::classify;
