//! Local filesystem port.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error from a local filesystem operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocalFsError {
    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed {
        /// The directory.
        path: PathBuf,
        /// Detailed error message.
        reason: String,
    },

    /// Failed to remove a partially written file.
    #[error("Failed to remove {path}: {reason}")]
    RemoveFailed {
        /// The file.
        path: PathBuf,
        /// Detailed error message.
        reason: String,
    },
}

/// Port for the local side of a mirror job.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait LocalFsPort {
    /// Ensure a directory (and its parents) exists.
    ///
    /// Succeeds without changes if it already exists.
    fn ensure_dir(&self, path: &Path) -> Result<(), LocalFsError>;

    /// Remove whatever a failed transfer left at `path`, if anything.
    fn remove_partial(&self, path: &Path) -> Result<(), LocalFsError>;
}
