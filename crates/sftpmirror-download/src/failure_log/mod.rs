//! File-backed failure log.
//!
//! Plain text, one relative remote path per line, `\n` terminated, no header
//! and no escaping. The file is truncated when a job opens it.

use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

use sftpmirror_core::ports::{FailureLogError, FailureLogPort, FailureLogWriter};
use sftpmirror_core::{DEFAULT_FAILURE_LOG, RemotePath};

/// Failure log written to a file (by default `badfiles.txt` in the working
/// directory).
#[derive(Debug, Clone)]
pub struct FileFailureLog {
    path: PathBuf,
}

impl FileFailureLog {
    /// Log to the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the log is written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileFailureLog {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_LOG)
    }
}

impl FailureLogPort for FileFailureLog {
    fn open(&self) -> Result<Box<dyn FailureLogWriter>, FailureLogError> {
        let file = File::create(&self.path).map_err(|source| FailureLogError::Open {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "Opened failure log");
        Ok(Box::new(FileFailureWriter {
            // Line buffered so every record is on disk as soon as it is logged.
            inner: LineWriter::new(file),
        }))
    }
}

struct FileFailureWriter {
    inner: LineWriter<File>,
}

impl FailureLogWriter for FileFailureWriter {
    fn record(&mut self, path: &RemotePath) -> Result<(), FailureLogError> {
        self.inner
            .write_all(path.as_str().as_bytes())
            .and_then(|()| self.inner.write_all(b"\n"))
            .map_err(FailureLogError::Write)
    }

    fn finish(&mut self) -> Result<(), FailureLogError> {
        self.inner.flush().map_err(FailureLogError::Write)
    }
}
