//! Hosts file model and text rendering.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::api::MachineRecord;

/// Number of lines in the comment header, including the trailing blank line.
pub const HEADER_LINES: usize = 4;

/// One address-to-hostname mapping line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    /// IP address exactly as returned by the registry
    pub address: String,
    /// Machine name with the domain suffix appended
    pub hostname: String,
}

/// A fully rendered hosts file.
///
/// Always rebuilt from scratch; entries keep the registry order, machine by
/// machine and address by address, without de-duplication.
///
/// # Example
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use headscale2hosts::api::MachineRecord;
/// use headscale2hosts::hosts::HostsFile;
///
/// let at = FixedOffset::east_opt(0)
///     .unwrap()
///     .with_ymd_and_hms(2022, 3, 1, 12, 0, 0)
///     .unwrap();
/// let machines = [MachineRecord::new("alice", ["100.64.0.1"])];
/// let hosts = HostsFile::from_machines(&machines, ".ts.net", at);
///
/// assert!(hosts.render().ends_with("100.64.0.1 alice.ts.net\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsFile {
    generated_at: DateTime<FixedOffset>,
    entries: Vec<HostEntry>,
}

impl HostsFile {
    /// Builds the hosts file for `machines`, appending `domain_suffix`
    /// verbatim to every machine name.
    #[must_use]
    pub fn from_machines(
        machines: &[MachineRecord],
        domain_suffix: &str,
        generated_at: DateTime<FixedOffset>,
    ) -> Self {
        let entries = machines
            .iter()
            .flat_map(|machine| {
                let hostname = format!("{}{domain_suffix}", machine.name);
                machine.ip_addresses.iter().map(move |address| HostEntry {
                    address: address.clone(),
                    hostname: hostname.clone(),
                })
            })
            .collect();

        Self {
            generated_at,
            entries,
        }
    }

    /// Returns the mapping entries in output order.
    #[must_use]
    pub fn entries(&self) -> &[HostEntry] {
        &self.entries
    }

    /// Width of the address column: the longest address in bytes, or 0.
    #[must_use]
    pub fn address_width(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.address.len())
            .max()
            .unwrap_or(0)
    }

    /// Renders the complete file content.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HostsFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Generated by HEADSCALE2HOSTS")?;
        writeln!(
            f,
            "# Generated at {}",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        writeln!(f, "# Do not edit this file manually")?;
        writeln!(f)?;

        let width = self.address_width();
        for entry in &self.entries {
            // Byte-based padding; `{:<width$}` would count chars instead.
            let padding = width - entry.address.len();
            writeln!(
                f,
                "{}{:padding$} {}",
                entry.address, "", entry.hostname
            )?;
        }

        Ok(())
    }
}
