//! Remote path types.
//!
//! A [`RemotePath`] is always relative to the job's [`RemoteRoot`] and uses
//! `/` between components regardless of the local platform. It is the
//! identifier written to the failure log, so its textual form is part of the
//! persisted format.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator used on the remote side.
const REMOTE_SEPARATOR: char = '/';

/// Errors produced while building remote paths from listing names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// A listing returned a name that cannot be mapped safely to a local path.
    #[error("Invalid entry name {0:?}")]
    InvalidName(String),
}

/// A path relative to the remote root of a mirror job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemotePath(String);

impl RemotePath {
    /// Build a top-level path from a name returned by listing the root.
    pub fn top_level(name: &str) -> Result<Self, PathError> {
        validate_name(name)?;
        Ok(Self(name.to_string()))
    }

    /// Build the path of a child of this directory.
    pub fn child(&self, name: &str) -> Result<Self, PathError> {
        validate_name(name)?;
        Ok(Self(format!("{}{REMOTE_SEPARATOR}{name}", self.0)))
    }

    /// The relative path as written to the failure log.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the components of the path.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split(REMOTE_SEPARATOR)
    }

    /// Map onto a local destination below `local_root`, joining components
    /// with the local path separator.
    #[must_use]
    pub fn to_local(&self, local_root: &Path) -> PathBuf {
        let mut path = local_root.to_path_buf();
        path.extend(self.components());
        path
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reject names that would escape the output root or split into several
/// local components.
fn validate_name(name: &str) -> Result<(), PathError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('\0')
        || name.chars().any(|c| c == REMOTE_SEPARATOR || std::path::is_separator(c));
    if bad {
        Err(PathError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// The remote directory a job mirrors.
///
/// Held by the traversal engine and prepended to every [`RemotePath`] on each
/// remote call, instead of changing a working directory on the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteRoot(String);

impl RemoteRoot {
    /// Create a root from the user-supplied directory.
    ///
    /// Trailing separators are dropped, except for `/` itself.
    pub fn new(path: impl Into<String>) -> Self {
        let raw = path.into();
        let trimmed = raw.trim_end_matches(REMOTE_SEPARATOR);
        if trimmed.is_empty() && raw.starts_with(REMOTE_SEPARATOR) {
            Self(REMOTE_SEPARATOR.to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The root as given (normalised).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full remote path for an entry below this root.
    #[must_use]
    pub fn resolve(&self, path: &RemotePath) -> String {
        match self.0.as_str() {
            "" | "." => path.as_str().to_string(),
            "/" => format!("/{}", path.as_str()),
            base => format!("{base}{REMOTE_SEPARATOR}{}", path.as_str()),
        }
    }
}

impl fmt::Display for RemoteRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
