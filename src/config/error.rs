//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Every variant is fatal: the process exits before the first cycle.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI, environment or config file.
    #[error("{env} is not set. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Environment variable that provides the field
        env: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid server URL provided.
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid or non-positive duration value.
    #[error("Failed to parse {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// API key that cannot be sent in an HTTP header.
    #[error("Invalid API key: {reason}")]
    InvalidApiKey {
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The registry base URL.
    pub const SERVER_URL: &str = "server_url";
    /// The bearer API key.
    pub const API_KEY: &str = "api_key";
    /// The namespace filter.
    pub const NAMESPACE: &str = "namespace";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, env: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, env, hint }
    }
}
