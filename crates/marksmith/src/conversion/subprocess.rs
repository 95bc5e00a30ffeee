//! Subprocess-based converter implementation.

use std::io::Write;
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

use crate::core::{ConversionConfig, formats};
use crate::error::{MarksmithError, Result};

use super::DocumentConverter;

/// Converter that shells out to an external CLI (markitdown by default).
///
/// The payload is written to a temporary file whose suffix carries the
/// detected format, because the external tool picks its decoder from the
/// extension. The temp file is removed on every exit path, including
/// timeouts and converter failures.
pub struct MarkitdownConverter {
    config: ConversionConfig,
}

impl MarkitdownConverter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Build a converter from discovered configuration, falling back to
    /// defaults when no `marksmith.toml` is found.
    pub fn from_discovered_config() -> Result<Self> {
        let config = match ConversionConfig::discover()? {
            Some(config) => {
                tracing::info!(command = %config.command, "loaded conversion config from discovered file");
                config
            }
            None => ConversionConfig::default(),
        };
        Ok(Self::new(config))
    }
}

impl Default for MarkitdownConverter {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

/// Write the payload to a suffix-named temp file.
///
/// The returned guard owns the file; dropping it removes the file, which
/// covers every exit path of the caller.
fn write_temp_payload(bytes: &[u8], format_label: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("marksmith-")
        .suffix(&formats::temp_suffix(format_label))
        .tempfile()
        .map_err(MarksmithError::Io)?;

    file.write_all(bytes).map_err(MarksmithError::Io)?;
    file.flush().map_err(MarksmithError::Io)?;
    Ok(file)
}

#[async_trait]
impl DocumentConverter for MarkitdownConverter {
    async fn convert(&self, bytes: &[u8], format_label: &str) -> Result<String> {
        let temp_file = write_temp_payload(bytes, format_label)?;

        let child = Command::new(&self.config.command)
            .arg(temp_file.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| std::io::Error::other(format!("Failed to execute {}: {}", self.config.command, e)))?;

        let output = match timeout(Duration::from_secs(self.config.timeout_seconds), child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(std::io::Error::other(format!("Failed to wait for {}: {}", self.config.command, e)).into());
            }
            Err(_) => {
                return Err(MarksmithError::conversion(
                    format_label,
                    format!("converter timed out after {} seconds", self.config.timeout_seconds),
                ));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            // "not supported"-type failures mean the classification was right
            // but the converter cannot handle the format.
            let stderr_lower = stderr.to_lowercase();
            if stderr_lower.contains("not supported")
                || stderr_lower.contains("unsupported")
                || stderr_lower.contains("unsupportedformatexception")
            {
                return Err(MarksmithError::UnsupportedFormat(format_label.to_string()));
            }

            return Err(MarksmithError::conversion(
                format_label,
                format!("converter exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            MarksmithError::conversion(format_label, format!("converter produced invalid UTF-8 output: {}", e))
        })
    }
}
