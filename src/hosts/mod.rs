//! Hosts file rendering and output.
//!
//! This module provides:
//! - The rendered hosts file model ([`HostsFile`], [`HostEntry`])
//! - Output abstraction ([`HostsSink`]) with a file-backed implementation
//!   ([`FileHostsSink`])

mod file;
mod render;


pub use file::FileHostsSink;
pub use render::{HEADER_LINES, HostEntry, HostsFile};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing the hosts file.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to write the hosts file.
    #[error("failed to write hosts file '{}': {source}", path.display())]
    Io {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The blocking write task was cancelled or panicked.
    #[error("hosts file write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Destination for rendered hosts files.
///
/// Each call replaces the whole previous content; there are no partial
/// updates.
pub trait HostsSink: Send + Sync {
    /// Human-readable location, used in log lines.
    fn location(&self) -> String;

    /// Replaces the destination content with `contents`.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] if the content cannot be written.
    fn write(
        &self,
        contents: String,
    ) -> impl std::future::Future<Output = Result<(), WriteError>> + Send;
}
