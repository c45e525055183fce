//! Remote filesystem port.
//!
//! The narrow capability set the traversal engine needs from an
//! authenticated remote session.

use std::path::Path;

use thiserror::Error;

use crate::domain::EntryMeta;

/// Error from a remote filesystem operation.
///
/// Adapters map their transport errors onto these variants at the boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteFsError {
    /// The path does not exist.
    #[error("No such remote file: {path}")]
    NotFound {
        /// Full remote path.
        path: String,
    },

    /// The server refused access.
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Full remote path.
        path: String,
    },

    /// Writing the local copy failed during a transfer.
    #[error("Local write failed for {path}: {message}")]
    LocalWrite {
        /// Full remote path being transferred.
        path: String,
        /// Detailed error message.
        message: String,
    },

    /// Any other protocol or transport failure.
    #[error("Remote error on {path}: {message}")]
    Protocol {
        /// Full remote path.
        path: String,
        /// Detailed error message.
        message: String,
    },
}

impl RemoteFsError {
    /// Create a not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a permission denied error.
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Create a local write error.
    pub fn local_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LocalWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a protocol error.
    pub fn protocol(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Protocol {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if the error means the path is absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Port for the remote side of a mirror job.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait RemoteFsPort {
    /// Query metadata without following symbolic links.
    fn stat(&self, path: &str) -> Result<EntryMeta, RemoteFsError>;

    /// List the names of a directory's children, excluding `.` and `..`,
    /// in the order the server returns them.
    fn list(&self, path: &str) -> Result<Vec<String>, RemoteFsError>;

    /// Transfer a remote file into `local`, returning the bytes written.
    ///
    /// The parent of `local` exists when this is called.
    fn download(&self, remote: &str, local: &Path) -> Result<u64, RemoteFsError>;
}
