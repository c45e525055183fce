//! Job report.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::RemotePath;

/// What a completed mirror job did.
///
/// A job that reaches the end of its queue always produces a summary, no
/// matter how many entries failed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MirrorSummary {
    /// Remote root that was mirrored.
    pub remote_root: String,
    /// Local destination root.
    pub local_root: PathBuf,
    /// Entries queued during traversal, top-level ones included.
    pub discovered: u64,
    /// Directories expanded (and mirrored locally).
    pub directories: u64,
    /// Files transferred successfully.
    pub downloaded: u64,
    /// Bytes transferred successfully.
    pub bytes: u64,
    /// Entries that could not be retrieved, in the order they were logged.
    pub failed: Vec<RemotePath>,
    /// When the job started.
    pub started_at: DateTime<Utc>,
    /// When the queue drained.
    pub finished_at: DateTime<Utc>,
}

impl MirrorSummary {
    /// Start an empty summary for a job.
    pub fn begin(remote_root: impl Into<String>, local_root: impl Into<PathBuf>) -> Self {
        let now = Utc::now();
        Self {
            remote_root: remote_root.into(),
            local_root: local_root.into(),
            discovered: 0,
            directories: 0,
            downloaded: 0,
            bytes: 0,
            failed: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    /// Count one successful transfer.
    pub const fn record_download(&mut self, bytes: u64) {
        self.downloaded += 1;
        self.bytes = self.bytes.saturating_add(bytes);
    }

    /// Count one entry that could not be retrieved.
    pub fn record_failure(&mut self, path: RemotePath) {
        self.failed.push(path);
    }

    /// Count one expanded directory.
    pub const fn record_directory(&mut self) {
        self.directories += 1;
    }

    /// Set how many entries the traversal queued in total.
    pub const fn record_discovered(&mut self, entries: u64) {
        self.discovered = entries;
    }

    /// Stamp the finish time.
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    /// Number of entries that could not be retrieved.
    #[must_use]
    pub fn failed_count(&self) -> u64 {
        self.failed.len() as u64
    }

    /// Check if every entry was retrieved.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Wall-clock duration of the job.
    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
