//! Configuration layer for headscale2hosts.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Environment variables ([`EnvConfig`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Duration strings ([`parse_duration`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Each value is resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **`HEADSCALE2HOSTS_*` environment variables** (empty values are ignored)
//! 3. **TOML config file** named by `--config`
//! 4. **Built-in defaults**
//!
//! `server_url`, `api_key` and `namespace` have no default; if no source
//! provides them, startup fails before any request is made. The interval
//! is parsed first, so a malformed interval is reported before missing
//! fields.
//!
//! The registry request timeout (10 seconds) is not configurable.

mod cli;
pub mod defaults;
mod duration;
mod env;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command};
pub use duration::{DurationError, parse_duration};
pub use env::{EnvConfig, var};
pub use error::{ConfigError, field};
pub use self::toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
