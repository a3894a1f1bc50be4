//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default output path, relative to the working directory.
pub const HOSTS_FILE: &str = "hosts";

/// Default domain suffix (none).
pub const DOMAIN_SUFFIX: &str = "";

/// Timeout applied to every registry request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default output path for the `init` subcommand.
pub const CONFIG_TEMPLATE_PATH: &str = "headscale2hosts.toml";

/// Default poll interval (one minute).
#[must_use]
pub const fn check_interval() -> Duration {
    Duration::from_secs(60)
}

/// Registry request timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}
