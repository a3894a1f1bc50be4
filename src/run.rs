//! Application execution logic.
//!
//! Wires the validated configuration into a [`Poller`] and drives it
//! until a shutdown signal, or for a single cycle with `--once`.

use thiserror::Error;
use tokio::signal;

use headscale2hosts::api::{FetchError, HeadscaleApi, HttpError, ReqwestClient};
use headscale2hosts::config::ValidatedConfig;
use headscale2hosts::hosts::FileHostsSink;
use headscale2hosts::poller::{CycleError, Poller};

/// Type alias for the application's poller.
type AppPoller = Poller<HeadscaleApi<ReqwestClient>, FileHostsSink>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] HttpError),

    /// Failed to build the registry client.
    #[error("Failed to create Headscale client: {0}")]
    Api(#[source] FetchError),

    /// The single `--once` cycle failed.
    #[error("Cycle failed: {0}")]
    Cycle(#[source] CycleError),
}

/// Builds the poller from configuration.
fn create_poller(config: &ValidatedConfig) -> Result<AppPoller, RunError> {
    let client = ReqwestClient::with_timeout(config.request_timeout).map_err(RunError::Client)?;
    let api = HeadscaleApi::new(
        client,
        &config.server_url,
        &config.namespace,
        &config.api_key,
    )
    .map_err(RunError::Api)?;

    Ok(
        Poller::new(api, FileHostsSink::new(&config.hosts_file), config.check_interval)
            .with_domain_suffix(config.domain_suffix.clone())
            .with_dry_run(config.dry_run),
    )
}

/// Executes the main application loop.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP or registry client cannot be built
/// - The single cycle fails in `--once` mode
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// a real async runtime with signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let poller = create_poller(&config)?;

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - the hosts file will be logged but not written");
    }

    if config.once {
        poller.run_once().await.map_err(RunError::Cycle)?;
        return Ok(());
    }

    tracing::info!(
        "Polling {} every {:?}",
        poller_endpoint(&poller),
        config.check_interval
    );
    let cycles = poller.run_until(shutdown_signal()).await;
    tracing::debug!("Stopped after {cycles} cycle(s)");

    Ok(())
}

fn poller_endpoint(poller: &AppPoller) -> String {
    poller.source().endpoint().to_string()
}

/// Returns a future that completes when a shutdown signal is received.
///
/// A handler that cannot be installed never fires; the process then
/// only stops when killed.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
