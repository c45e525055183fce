//! Failure log port.
//!
//! The failure log is the one durable artifact of a job: one relative remote
//! path per line for every entry that could not be retrieved. The engine
//! opens it once, after the remote root is known to exist, and holds the
//! writer for the whole traversal.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::RemotePath;

/// Error from the failure log.
#[derive(Debug, Error)]
pub enum FailureLogError {
    /// The log could not be created.
    #[error("Failed to create failure log {path}: {source}")]
    Open {
        /// Log file location.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A record could not be written or flushed.
    #[error("Failed to write failure log: {0}")]
    Write(#[source] std::io::Error),
}

/// Opens a fresh (truncated) failure log for one job.
pub trait FailureLogPort {
    /// Create the log, discarding any previous content.
    fn open(&self) -> Result<Box<dyn FailureLogWriter>, FailureLogError>;
}

/// An open failure log.
///
/// Dropping the writer closes it; `finish` additionally surfaces flush errors.
pub trait FailureLogWriter {
    /// Append one record.
    fn record(&mut self, path: &RemotePath) -> Result<(), FailureLogError>;

    /// Flush everything written so far.
    fn finish(&mut self) -> Result<(), FailureLogError>;
}
