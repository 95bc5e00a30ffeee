//! API server setup and configuration.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{
    Result,
    conversion::{DocumentConverter, MarkitdownConverter},
    core::ConversionConfig,
};

use super::{
    handlers::{convert_base64_handler, convert_handler, formats_handler, health_handler, root_handler},
    types::{ApiSizeLimits, ApiState},
};

/// Parse size limits from environment variables.
///
/// Reads, in order of preference:
/// 1. `MARKSMITH_MAX_REQUEST_BODY_BYTES` - maximum request body size in bytes
/// 2. `MARKSMITH_MAX_UPLOAD_SIZE_MB` - (legacy) maximum size in MB
///
/// Falls back to the default (100 MB) if neither is set or valid.
fn parse_size_limits_from_env() -> ApiSizeLimits {
    if let Ok(value) = std::env::var("MARKSMITH_MAX_REQUEST_BODY_BYTES") {
        match value.parse::<usize>() {
            Ok(bytes) if bytes > 0 => {
                tracing::info!(
                    "Request body limit configured from environment: {} bytes ({:.1} MB)",
                    bytes,
                    bytes as f64 / (1024.0 * 1024.0)
                );
                return ApiSizeLimits::new(bytes);
            }
            _ => {
                tracing::warn!(
                    "Failed to parse MARKSMITH_MAX_REQUEST_BODY_BYTES='{}', must be a positive integer",
                    value
                );
            }
        }
    }

    if let Ok(value) = std::env::var("MARKSMITH_MAX_UPLOAD_SIZE_MB") {
        match value.parse::<usize>() {
            Ok(mb) if mb > 0 => {
                tracing::info!("Request body limit configured from environment (legacy): {} MB", mb);
                return ApiSizeLimits::from_mb(mb);
            }
            _ => {
                tracing::warn!(
                    "Failed to parse MARKSMITH_MAX_UPLOAD_SIZE_MB='{}', must be a positive integer",
                    value
                );
            }
        }
    }

    let limits = ApiSizeLimits::default();
    tracing::info!(
        "Request body limit: 100 MB (default, {} bytes) - configure with MARKSMITH_MAX_REQUEST_BODY_BYTES",
        limits.max_request_body_bytes
    );
    limits
}

/// Create the API router with all routes configured.
///
/// Public to allow embedding the router in other applications; the converter
/// is injected so tests can substitute a stub.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use marksmith::{MarkitdownConverter, api::create_router};
///
/// let router = create_router(Arc::new(MarkitdownConverter::default()));
/// ```
pub fn create_router(converter: Arc<dyn DocumentConverter>) -> Router {
    create_router_with_limits(converter, ApiSizeLimits::default())
}

/// Create the API router with custom size limits.
pub fn create_router_with_limits(converter: Arc<dyn DocumentConverter>, limits: ApiSizeLimits) -> Router {
    let state = ApiState { converter };

    // The default allows all origins for development convenience; production
    // deployments must set MARKSMITH_CORS_ORIGINS to an explicit list.
    let cors_layer = if let Ok(origins_str) = std::env::var("MARKSMITH_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            tracing::warn!(
                "MARKSMITH_CORS_ORIGINS set but empty/invalid - falling back to permissive CORS. \
                 Set explicit origins for production."
            );
            CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
        }
    } else {
        tracing::warn!(
            "CORS configured to allow all origins (default). For production, set MARKSMITH_CORS_ORIGINS \
             to a comma-separated list of allowed origins"
        );
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    };

    Router::new()
        .route("/", get(root_handler))
        .route("/convert", post(convert_handler))
        .route("/convert-base64", post(convert_base64_handler))
        .route("/formats", get(formats_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_request_body_bytes))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server with config file discovery.
///
/// Searches for `marksmith.toml` in current and parent directories; uses the
/// default conversion configuration when none is found. Size limits come
/// from the environment.
///
/// # Arguments
///
/// * `host` - IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// * `port` - Port number to bind to (e.g., 8000)
///
/// # Examples
///
/// ```no_run
/// use marksmith::api::serve;
///
/// #[tokio::main]
/// async fn main() -> marksmith::Result<()> {
///     serve("127.0.0.1", 8000).await?;
///     Ok(())
/// }
/// ```
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let config = match ConversionConfig::discover()? {
        Some(config) => {
            tracing::info!("Loaded conversion config from discovered file");
            config
        }
        None => {
            tracing::info!("No config file found, using default configuration");
            ConversionConfig::default()
        }
    };

    let limits = parse_size_limits_from_env();

    serve_with_config_and_limits(host, port, config, limits).await
}

/// Start the API server with explicit conversion config.
///
/// Uses default size limits (100 MB). For custom limits, use
/// `serve_with_config_and_limits`.
pub async fn serve_with_config(host: impl AsRef<str>, port: u16, config: ConversionConfig) -> Result<()> {
    serve_with_config_and_limits(host, port, config, ApiSizeLimits::default()).await
}

/// Start the API server with explicit config and size limits.
pub async fn serve_with_config_and_limits(
    host: impl AsRef<str>,
    port: u16,
    config: ConversionConfig,
    limits: ApiSizeLimits,
) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| crate::error::MarksmithError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);
    let converter: Arc<dyn DocumentConverter> = Arc::new(MarkitdownConverter::new(config));
    let app = create_router_with_limits(converter, limits);

    tracing::info!("Starting Marksmith API server on http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(crate::error::MarksmithError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::MarksmithError::Other(e.to_string()))?;

    Ok(())
}

/// Start the API server with default host and port.
///
/// Defaults: host = "127.0.0.1", port = 8000.
pub async fn serve_default() -> Result<()> {
    serve("127.0.0.1", 8000).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_router() {
        let converter: Arc<dyn DocumentConverter> = Arc::new(MarkitdownConverter::default());
        let _router = create_router(converter);
    }

    #[test]
    fn test_create_router_with_limits() {
        let converter: Arc<dyn DocumentConverter> = Arc::new(MarkitdownConverter::default());
        let _router = create_router_with_limits(converter, ApiSizeLimits::from_mb(5));
    }
}
