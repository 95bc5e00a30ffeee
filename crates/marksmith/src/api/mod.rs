//! REST API server for Marksmith document conversion.
//!
//! An Axum-based HTTP server that classifies uploaded payloads from content
//! and hands them to the external converter.
//!
//! # Endpoints
//!
//! - `POST /convert` - Convert raw document bytes to Markdown
//! - `POST /convert-base64` - Convert base64-wrapped bytes, with an optional
//!   filename hint
//! - `GET /formats` - Detection vs conversion capabilities
//! - `GET /health` - Health check endpoint
//! - `GET /` - Service banner with endpoint map
//!
//! # Examples
//!
//! ## Starting the server
//!
//! ```no_run
//! use marksmith::api::serve;
//!
//! #[tokio::main]
//! async fn main() -> marksmith::Result<()> {
//!     serve("127.0.0.1", 8000).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding the router in your app
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::Router;
//! use marksmith::{MarkitdownConverter, api::create_router};
//!
//! let conversion_router = create_router(Arc::new(MarkitdownConverter::default()));
//! let app = Router::new().nest("/api", conversion_router);
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! # Raw bytes
//! curl --data-binary @document.pdf http://localhost:8000/convert
//!
//! # Base64 with filename hint
//! curl -H 'Content-Type: application/json' \
//!      -d '{"content":"JVBERi0...","filename":"report.pdf"}' \
//!      http://localhost:8000/convert-base64
//!
//! # Capabilities
//! curl http://localhost:8000/formats
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, create_router_with_limits, serve, serve_default, serve_with_config, serve_with_config_and_limits};
pub use types::{
    ApiSizeLimits, ApiState, Base64ConvertRequest, CategoryMap, ConversionSupport, DetectionCapabilities,
    DetectionOnly, EndpointCatalog, ErrorResponse, FormatNotes, FormatsResponse, HealthResponse, RootResponse,
};
