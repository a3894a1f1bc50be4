//! File-backed hosts sink.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{HostsSink, WriteError};

/// Permission bits applied when the file is created.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Writes the hosts file in place.
///
/// The file is truncated and rewritten in a single call. There is no
/// temp-file-and-rename step, so a concurrent reader may observe a
/// partially written file. Newly created files get mode `0644` on Unix;
/// existing files keep their permissions.
#[derive(Debug, Clone)]
pub struct FileHostsSink {
    path: PathBuf,
}

impl FileHostsSink {
    /// Creates a sink writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Performs the blocking write.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn write_blocking(path: &Path, contents: &[u8]) -> Result<(), WriteError> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }

        let io_error = |source: std::io::Error| WriteError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = options.open(path).map_err(io_error)?;
        file.write_all(contents).map_err(io_error)
    }
}

impl HostsSink for FileHostsSink {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn write(&self, contents: String) -> Result<(), WriteError> {
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || Self::write_blocking(&path, contents.as_bytes()))
            .await?
    }
}
