//! `std::fs` adapter for the local filesystem port.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use sftpmirror_core::ports::{LocalFsError, LocalFsPort};

/// Local filesystem backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdLocalFs;

impl StdLocalFs {
    /// Create the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LocalFsPort for StdLocalFs {
    fn ensure_dir(&self, path: &Path) -> Result<(), LocalFsError> {
        if path.is_dir() {
            return Ok(());
        }
        if path.exists() {
            return Err(LocalFsError::NotADirectory(path.to_path_buf()));
        }
        fs::create_dir_all(path).map_err(|e| LocalFsError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Created local directory");
        Ok(())
    }

    fn remove_partial(&self, path: &Path) -> Result<(), LocalFsError> {
        match fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed partial download");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LocalFsError::RemoveFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
}
