//! Fetch, render and write loop.
//!
//! A [`Poller`] runs one cycle at a time: fetch the machine list, render
//! it as a hosts file, overwrite the output. Cycles never overlap and a
//! failed cycle only affects itself; the next one starts after the usual
//! interval with no backoff.

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::api::{FetchError, MachineSource};
use crate::hosts::{HostsFile, HostsSink, WriteError};
use crate::time::{Clock, SystemClock};

/// Error that abandons a single cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The machine list could not be fetched or decoded.
    #[error("failed to get machines: {0}")]
    Fetch(#[from] FetchError),

    /// The rendered file could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Summary of a successful cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Machines returned by the registry
    pub machines: usize,
    /// Mapping lines written
    pub entries: usize,
}

/// Periodic hosts file generator.
///
/// # Type Parameters
///
/// * `S` - The [`MachineSource`] providing the machine list
/// * `W` - The [`HostsSink`] receiving the rendered file
/// * `C` - The [`Clock`] used for the header timestamp (defaults to [`SystemClock`])
///
/// # Example
///
/// ```ignore
/// use headscale2hosts::hosts::FileHostsSink;
/// use headscale2hosts::poller::Poller;
/// use std::time::Duration;
///
/// let poller = Poller::new(api, FileHostsSink::new("hosts"), Duration::from_secs(60))
///     .with_domain_suffix(".ts.net");
/// poller.run_until(tokio::signal::ctrl_c().map(drop)).await;
/// ```
#[derive(Debug)]
pub struct Poller<S, W, C = SystemClock> {
    source: S,
    sink: W,
    clock: C,
    interval: Duration,
    domain_suffix: String,
    dry_run: bool,
}

impl<S, W> Poller<S, W, SystemClock> {
    /// Creates a poller using the system clock, no suffix and real writes.
    #[must_use]
    pub const fn new(source: S, sink: W, interval: Duration) -> Self {
        Self {
            source,
            sink,
            clock: SystemClock,
            interval,
            domain_suffix: String::new(),
            dry_run: false,
        }
    }
}

impl<S, W, C> Poller<S, W, C> {
    /// Replaces the clock used for header timestamps.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> Poller<S, W, C2> {
        Poller {
            source: self.source,
            sink: self.sink,
            clock,
            interval: self.interval,
            domain_suffix: self.domain_suffix,
            dry_run: self.dry_run,
        }
    }

    /// Sets the suffix appended to every machine name.
    #[must_use]
    pub fn with_domain_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.domain_suffix = suffix.into();
        self
    }

    /// Logs the rendered file instead of writing it when `dry_run` is set.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the delay between cycles.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the configured domain suffix.
    #[must_use]
    pub fn domain_suffix(&self) -> &str {
        &self.domain_suffix
    }

    /// Returns the machine source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the output sink.
    #[must_use]
    pub const fn sink(&self) -> &W {
        &self.sink
    }
}

impl<S, W, C> Poller<S, W, C>
where
    S: MachineSource,
    W: HostsSink,
    C: Clock,
{
    /// Runs one fetch, render and write cycle.
    ///
    /// Nothing is written when the fetch fails, so the previous file
    /// content stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if fetching or writing fails.
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let list = self.source.fetch_machines().await?;
        let hosts = HostsFile::from_machines(&list.machines, &self.domain_suffix, self.clock.now());

        let report = CycleReport {
            machines: list.machines.len(),
            entries: hosts.entries().len(),
        };

        if self.dry_run {
            tracing::info!(
                "Dry-run: {} entries for {}\n{}",
                report.entries,
                self.sink.location(),
                hosts.render()
            );
            return Ok(report);
        }

        self.sink.write(hosts.render()).await?;
        Ok(report)
    }

    /// Runs one cycle and logs its success.
    ///
    /// Failures are returned without being logged so the caller decides
    /// how to report them.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if fetching or writing fails.
    pub async fn run_once(&self) -> Result<CycleReport, CycleError> {
        let report = self.run_cycle().await?;

        if self.dry_run {
            tracing::debug!("Dry-run cycle rendered {} entries", report.entries);
        } else {
            tracing::info!(
                "wrote {} entries ({} machines) to {}",
                report.entries,
                report.machines,
                self.sink.location()
            );
        }

        Ok(report)
    }

    /// Runs cycles until `shutdown` completes, returning the number of
    /// cycles started.
    ///
    /// The shutdown future is only observed between cycles, so an
    /// in-flight request or write always runs to completion. Each cycle
    /// logs exactly one line, success or failure.
    pub async fn run_until<F>(&self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycles = 0;

        loop {
            cycles += 1;
            if let Err(e) = self.run_once().await {
                tracing::error!("{e}");
            }

            tokio::select! {
                biased;

                () = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping...");
                    return cycles;
                }

                () = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
