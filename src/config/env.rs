//! Environment variable source.
//!
//! Variables are read once at startup. An empty value counts as unset.

use std::collections::HashMap;

/// Names of the recognized environment variables.
pub mod var {
    /// Poll interval, duration syntax.
    pub const CHECK_INTERVAL: &str = "HEADSCALE2HOSTS_CHECK_INTERVAL";
    /// Base URL of the Headscale server.
    pub const SERVER_URL: &str = "HEADSCALE2HOSTS_SERVER_URL";
    /// Bearer API key.
    pub const API_KEY: &str = "HEADSCALE2HOSTS_API_KEY";
    /// Namespace filter.
    pub const NAMESPACE: &str = "HEADSCALE2HOSTS_NAMESPACE";
    /// Output file path.
    pub const HOSTS_FILE: &str = "HEADSCALE2HOSTS_HOSTS_FILE";
    /// Hostname suffix.
    pub const DOMAIN_SUFFIX: &str = "HEADSCALE2HOSTS_DOMAIN_SUFFIX";
}

/// Configuration values taken from `HEADSCALE2HOSTS_*` variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub check_interval: Option<String>,
    pub server_url: Option<String>,
    pub api_key: Option<String>,
    pub namespace: Option<String>,
    pub hosts_file: Option<String>,
    pub domain_suffix: Option<String>,
}

impl EnvConfig {
    /// Reads the process environment.
    ///
    /// Variables whose value is not valid Unicode are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Builds the configuration from explicit key/value pairs.
    ///
    /// Lets tests supply variables without touching the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();

        Self {
            check_interval: map.remove(var::CHECK_INTERVAL),
            server_url: map.remove(var::SERVER_URL),
            api_key: map.remove(var::API_KEY),
            namespace: map.remove(var::NAMESPACE),
            hosts_file: map.remove(var::HOSTS_FILE),
            domain_suffix: map.remove(var::DOMAIN_SUFFIX),
        }
    }
}
