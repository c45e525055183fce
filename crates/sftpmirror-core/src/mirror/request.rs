//! Mirror job request.

use std::path::PathBuf;

use crate::domain::RemoteRoot;

/// One remote directory to mirror into one local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRequest {
    /// Remote directory whose contents are mirrored.
    pub remote_root: RemoteRoot,
    /// Local directory that receives the contents. Created if missing.
    pub local_root: PathBuf,
}

impl MirrorRequest {
    /// Create a new request.
    pub fn new(remote_root: impl Into<String>, local_root: impl Into<PathBuf>) -> Self {
        Self {
            remote_root: RemoteRoot::new(remote_root),
            local_root: local_root.into(),
        }
    }
}
