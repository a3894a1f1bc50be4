//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional so a file can hold any subset of the settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Headscale server section
    #[serde(default)]
    pub server: ServerSection,

    /// Output section
    #[serde(default)]
    pub output: OutputSection,

    /// Polling section
    #[serde(default)]
    pub poll: PollSection,
}

/// Headscale server section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Base URL of the Headscale server
    pub url: Option<String>,

    /// Bearer API key
    pub api_key: Option<String>,

    /// Namespace filter
    pub namespace: Option<String>,
}

/// Output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Output hosts file path
    pub hosts_file: Option<String>,

    /// Suffix appended to machine names
    pub domain_suffix: Option<String>,
}

/// Polling section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollSection {
    /// Poll interval in duration syntax
    pub check_interval: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# headscale2hosts configuration file
#
# Every setting can also be given as a HEADSCALE2HOSTS_* environment
# variable or a command-line flag. Flags win over the environment,
# which wins over this file.

[server]
# Base URL of the Headscale server (required)
# Env: HEADSCALE2HOSTS_SERVER_URL
# url = "https://headscale.example.com"

# Bearer API key (required), see `headscale apikeys create`
# Env: HEADSCALE2HOSTS_API_KEY
# api_key = "your-api-key"

# Namespace whose machines are listed (required)
# Env: HEADSCALE2HOSTS_NAMESPACE
# namespace = "default"

[output]
# Hosts file to overwrite on every cycle (default: "hosts")
# Env: HEADSCALE2HOSTS_HOSTS_FILE
# hosts_file = "/etc/hosts.d/headscale"

# Suffix appended verbatim to every machine name (default: none)
# Env: HEADSCALE2HOSTS_DOMAIN_SUFFIX
# domain_suffix = ".ts.net"

[poll]
# Poll interval, e.g. "30s", "1m", "1h30m" (default: "1m")
# Env: HEADSCALE2HOSTS_CHECK_INTERVAL
check_interval = "1m"
"#
    .to_string()
}
