//! Progress events emitted during a mirror job.
//!
//! Events are observability only; nothing in the engine reads them back.

use serde::{Deserialize, Serialize};

use crate::domain::RemotePath;

/// A progress notice from the traversal engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MirrorEvent {
    /// The root was listed and traversal is about to start.
    Started {
        /// Remote root of the job.
        remote_root: String,
        /// Number of top-level entries queued.
        queued: usize,
    },

    /// A local mirror directory was ensured and its children queued.
    DirectoryEntered {
        /// Relative remote path of the directory.
        path: RemotePath,
        /// Number of children appended to the queue.
        children: usize,
    },

    /// A file transfer is starting.
    DownloadStarted {
        /// Relative remote path of the file.
        path: RemotePath,
    },

    /// A file transfer succeeded.
    DownloadCompleted {
        /// Relative remote path of the file.
        path: RemotePath,
        /// Bytes written locally.
        bytes: u64,
    },

    /// A file transfer failed and the path was logged.
    DownloadFailed {
        /// Relative remote path of the file.
        path: RemotePath,
    },

    /// An entry disappeared between listing and classification.
    EntrySkipped {
        /// Relative remote path of the entry.
        path: RemotePath,
    },

    /// The queue drained.
    Finished {
        /// Files downloaded.
        downloaded: u64,
        /// Entries that could not be retrieved.
        failed: u64,
    },
}
