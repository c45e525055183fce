//! Fatal mirror errors.
//!
//! Only conditions that make the whole job unusable live here. A single
//! file that fails to transfer is never an error at this level; it becomes a
//! failure-log record instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::ports::{FailureLogError, LocalFsError, RemoteFsError};

/// Error that aborts a mirror job.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The remote root does not exist or cannot be queried.
    #[error("\"{path}\" was not found on the server")]
    NotFound {
        /// The remote root as given.
        path: String,
        /// Underlying remote error.
        #[source]
        source: RemoteFsError,
    },

    /// The remote root exists but is not a directory.
    #[error("\"{path}\" is not a directory on the server")]
    NotADirectory {
        /// The remote root as given.
        path: String,
    },

    /// Listing a remote directory failed.
    #[error("Failed to list remote directory \"{path}\"")]
    Listing {
        /// Full remote path of the directory.
        path: String,
        /// Underlying remote error.
        #[source]
        source: RemoteFsError,
    },

    /// A local mirror directory could not be created.
    #[error("Failed to prepare local directory {path}")]
    LocalDirectory {
        /// The local directory.
        path: PathBuf,
        /// Underlying local error.
        #[source]
        source: LocalFsError,
    },

    /// The failure log could not be opened or flushed.
    #[error(transparent)]
    FailureLog(#[from] FailureLogError),
}

impl MirrorError {
    /// Check if this is the missing-root precondition failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience result type for mirror jobs.
pub type MirrorResult<T> = Result<T, MirrorError>;
