//! Core domain types and port definitions for sftpmirror.
//!
//! This crate has no I/O of its own. It defines the vocabulary shared by the
//! traversal engine (`sftpmirror-download`), the SFTP adapter
//! (`sftpmirror-sftp`) and the command-line front end (`sftpmirror-cli`):
//!
//! - `domain` - remote paths and entry metadata
//! - `mirror` - job request, events, summary and the fatal error type
//! - `ports` - trait abstractions for the remote filesystem, the local
//!   filesystem, the failure log and event emission
//! - `settings` - shared defaults

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod mirror;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{EntryKind, EntryMeta, PathError, RemotePath, RemoteRoot};
pub use mirror::{MirrorError, MirrorEvent, MirrorRequest, MirrorResult, MirrorSummary};
pub use ports::{
    FailureLogError, FailureLogPort, FailureLogWriter, LocalFsError, LocalFsPort,
    MirrorEventEmitterPort, NoopMirrorEmitter, RemoteFsError, RemoteFsPort,
};
pub use settings::{DEFAULT_FAILURE_LOG, DEFAULT_SSH_PORT};

// Silence unused dev-dependency warnings
#[cfg(test)]
use serde_json as _;
