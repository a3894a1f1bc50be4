//! CLI argument parsing using clap.
//!
//! Every option here overrides the matching `HEADSCALE2HOSTS_*`
//! environment variable and config file entry.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// headscale2hosts: Headscale machines to hosts file
///
/// Periodically lists the machines of a Headscale namespace and
/// regenerates a hosts file mapping each machine address to its name.
#[derive(Debug, Parser)]
#[command(name = "headscale2hosts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the Headscale server
    #[arg(long = "server-url", value_name = "URL")]
    pub server_url: Option<String>,

    /// Bearer API key for the Headscale API
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Namespace whose machines are listed
    #[arg(long)]
    pub namespace: Option<String>,

    /// Output hosts file path
    #[arg(long = "hosts-file", value_name = "PATH")]
    pub hosts_file: Option<PathBuf>,

    /// Suffix appended to every machine name (e.g. ".ts.net")
    #[arg(long = "domain-suffix", value_name = "SUFFIX", allow_hyphen_values = true)]
    pub domain_suffix: Option<String>,

    /// Poll interval (e.g. "30s", "1m", "1h30m")
    #[arg(long = "check-interval", value_name = "DURATION")]
    pub check_interval: Option<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Log the rendered hosts file instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for headscale2hosts
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_TEMPLATE_PATH)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
