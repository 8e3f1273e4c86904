//! Schema engine configuration
//!
//! Configuration is TOML via serde. The core never touches the filesystem;
//! the loader that owns the schema files reads the text and hands it over.
//!
//! # Example
//!
//! ```toml
//! # Collapse ids present in both an action and the common scope
//! dedup_data_field_ids = true
//! # Severity used when nested container resolution misses
//! probe_miss_severity = "warn"
//! ```

use serde::{Deserialize, Serialize};

use crate::diagnostics::Severity;

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Per-table query behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Remove duplicate ids when listing action plus common data fields.
    ///
    /// Off by default: an id defined both for an action and in the common
    /// scope is listed twice.
    pub dedup_data_field_ids: bool,

    /// Severity for nested container resolution misses
    pub probe_miss_severity: Severity,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            dedup_data_field_ids: false,
            probe_miss_severity: Severity::Trace,
        }
    }
}

impl SchemaConfig {
    /// Parse config from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        tracing::debug!(?config, "Parsed schema config");
        Ok(config)
    }

    /// Serialize config to TOML text
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
