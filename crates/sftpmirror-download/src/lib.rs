//! Traversal and download engine for sftpmirror.
//!
//! Walks a remote directory tree breadth-first through the ports defined in
//! `sftpmirror-core`, mirrors directories locally, downloads files, and turns
//! every per-file transfer failure into a failure-log record instead of an
//! error.
//!
//! # Modules
//!
//! - `queue` - FIFO work queue of pending remote paths
//! - `engine` - the traversal loop (`DirectoryMirror`)
//! - `executor` - the single-file download step
//! - `local` - `std::fs` adapter for the local filesystem port
//! - `failure_log` - file-backed failure log (`badfiles.txt`)

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Re-export core types for convenience
pub use sftpmirror_core::{
    EntryKind, EntryMeta, MirrorError, MirrorEvent, MirrorRequest, MirrorResult, MirrorSummary,
    RemotePath, RemoteRoot,
};

pub(crate) mod executor;
pub(crate) mod queue;

mod engine;
mod failure_log;
mod local;

pub use engine::{DirectoryMirror, MirrorDeps};
pub use executor::{DownloadTarget, FileOutcome, get_file};
pub use failure_log::FileFailureLog;
pub use local::StdLocalFs;
pub use queue::WorkQueue;

// Silence unused dev-dependency warnings
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tempfile as _;
