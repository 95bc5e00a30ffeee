//! Configuration loading and discovery.
//!
//! The conversion façade is configurable: which external command to run and
//! how long to wait for it. Configuration is loaded from a `marksmith.toml`
//! discovered in the current directory or any parent, or created
//! programmatically.

use crate::error::{MarksmithError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_command() -> String {
    "markitdown".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

/// Settings for the external converter subprocess.
///
/// # Example
///
/// ```rust
/// use marksmith::ConversionConfig;
///
/// let config = ConversionConfig::default();
/// assert_eq!(config.command, "markitdown");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// External converter command. Receives the temp-file path as its only
    /// argument and must print Markdown on stdout.
    #[serde(default = "default_command")]
    pub command: String,

    /// Seconds to wait for the converter before giving up.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ConversionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `MarksmithError::Validation` if the file doesn't exist or is
    /// invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MarksmithError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| MarksmithError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Discover configuration in parent directories.
    ///
    /// Searches for `marksmith.toml` in the current directory and parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(MarksmithError::Io)?;

        loop {
            let candidate = current.join("marksmith.toml");
            if candidate.exists() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}
