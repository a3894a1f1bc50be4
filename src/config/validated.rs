//! Validated configuration after merging CLI, environment and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use super::cli::Cli;
use super::defaults;
use super::duration::parse_duration;
use super::env::{EnvConfig, var};
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// Built once at startup and never mutated afterwards.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from explicit sources, or
/// [`ValidatedConfig::load`] to read the process environment and the
/// config file named on the command line.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Base URL of the Headscale server (required)
    pub server_url: Url,

    /// Bearer API key (required)
    pub api_key: String,

    /// Namespace filter (required)
    pub namespace: String,

    /// Output hosts file path
    pub hosts_file: PathBuf,

    /// Suffix appended to every machine name
    pub domain_suffix: String,

    /// Delay between the end of one cycle and the start of the next
    pub check_interval: Duration,

    /// Timeout for each registry request
    pub request_timeout: Duration,

    /// Run a single cycle and exit
    pub once: bool,

    /// Log the rendered file instead of writing it
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The API key is deliberately left out.
        write!(
            f,
            "Config {{ server_url: {}, namespace: {}, hosts_file: {}, domain_suffix: {:?}, \
             check_interval: {:?}, once: {}, dry_run: {} }}",
            self.server_url,
            self.namespace,
            self.hosts_file.display(),
            self.domain_suffix,
            self.check_interval,
            self.once,
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from all sources.
    ///
    /// Priority per field: CLI > environment > TOML > default.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The interval is malformed or not positive
    /// - Required fields are missing (`server_url`, `api_key`, `namespace`)
    /// - The server URL is invalid
    /// - The API key cannot be sent as a header value
    pub fn from_raw(
        cli: &Cli,
        env: &EnvConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<Self, ConfigError> {
        let check_interval = Self::resolve_check_interval(cli, env, toml)?;
        let server_url = Self::resolve_server_url(cli, env, toml)?;
        let api_key = Self::resolve_api_key(cli, env, toml)?;
        let namespace = Self::resolve_namespace(cli, env, toml)?;

        let hosts_file = cli.hosts_file.clone().unwrap_or_else(|| {
            PathBuf::from(
                first_set(
                    None,
                    env.hosts_file.as_deref(),
                    toml.and_then(|t| t.output.hosts_file.as_deref()),
                )
                .unwrap_or(defaults::HOSTS_FILE),
            )
        });

        let domain_suffix = cli
            .domain_suffix
            .as_deref()
            .or(env.domain_suffix.as_deref())
            .or_else(|| toml.and_then(|t| t.output.domain_suffix.as_deref()))
            .unwrap_or(defaults::DOMAIN_SUFFIX)
            .to_string();

        Ok(Self {
            server_url,
            api_key,
            namespace,
            hosts_file,
            domain_suffix,
            check_interval,
            request_timeout: defaults::request_timeout(),
            once: cli.once,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI, the process environment
    /// and the optional config file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, &EnvConfig::from_env(), toml.as_ref())
    }

    fn resolve_check_interval(
        cli: &Cli,
        env: &EnvConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        let Some(text) = first_set(
            cli.check_interval.as_deref(),
            env.check_interval.as_deref(),
            toml.and_then(|t| t.poll.check_interval.as_deref()),
        ) else {
            return Ok(defaults::check_interval());
        };

        let interval = parse_duration(text).map_err(|e| ConfigError::InvalidDuration {
            field: var::CHECK_INTERVAL,
            reason: e.to_string(),
        })?;

        if interval.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: var::CHECK_INTERVAL,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(interval)
    }

    fn resolve_server_url(
        cli: &Cli,
        env: &EnvConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<Url, ConfigError> {
        let url_str = first_set(
            cli.server_url.as_deref(),
            env.server_url.as_deref(),
            toml.and_then(|t| t.server.url.as_deref()),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::SERVER_URL,
                var::SERVER_URL,
                "Use --server-url, set it in the environment, or set server.url in config file",
            )
        })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_api_key(
        cli: &Cli,
        env: &EnvConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<String, ConfigError> {
        let key = first_set(
            cli.api_key.as_deref(),
            env.api_key.as_deref(),
            toml.and_then(|t| t.server.api_key.as_deref()),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::API_KEY,
                var::API_KEY,
                "Use --api-key, set it in the environment, or set server.api_key in config file",
            )
        })?;

        HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
            ConfigError::InvalidApiKey {
                reason: e.to_string(),
            }
        })?;

        Ok(key.to_string())
    }

    fn resolve_namespace(
        cli: &Cli,
        env: &EnvConfig,
        toml: Option<&TomlConfig>,
    ) -> Result<String, ConfigError> {
        first_set(
            cli.namespace.as_deref(),
            env.namespace.as_deref(),
            toml.and_then(|t| t.server.namespace.as_deref()),
        )
        .map(ToString::to_string)
        .ok_or_else(|| {
            ConfigError::missing(
                field::NAMESPACE,
                var::NAMESPACE,
                "Use --namespace, set it in the environment, or set server.namespace in config file",
            )
        })
    }
}

/// Returns the first non-empty value in priority order.
///
/// An empty string counts as unset in every source.
fn first_set<'a>(
    cli: Option<&'a str>,
    env: Option<&'a str>,
    toml: Option<&'a str>,
) -> Option<&'a str> {
    [cli, env, toml].into_iter().flatten().find(|s| !s.is_empty())
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
