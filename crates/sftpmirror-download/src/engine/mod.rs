//! Breadth-first traversal of a remote directory tree.
//!
//! # Job Lifecycle
//!
//! 1. `stat` the remote root. A failure here is the fatal
//!    [`MirrorError::NotFound`] and nothing else happens: no listing, no
//!    local directories, no failure log.
//! 2. List the root and seed the [`WorkQueue`] with its children, relative
//!    to an explicit [`RemoteRoot`].
//! 3. Open the failure log for the rest of the job and ensure the local
//!    output root.
//! 4. Drain the queue. Directories are mirrored locally and their children
//!    appended at the tail; everything else goes through the download step.
//!
//! Only per-entry conditions are absorbed (a failed transfer, an entry that
//! vanished before it could be classified). Listing failures and local
//! directory failures abort the job.

use std::path::Path;

use sftpmirror_core::ports::{
    FailureLogPort, FailureLogWriter, LocalFsPort, MirrorEventEmitterPort, RemoteFsPort,
};
use sftpmirror_core::{
    MirrorError, MirrorEvent, MirrorRequest, MirrorResult, MirrorSummary, RemotePath, RemoteRoot,
};

use crate::executor::{self, DownloadTarget, FileOutcome};
use crate::queue::WorkQueue;

/// Ports a mirror job runs against.
#[derive(Clone, Copy)]
pub struct MirrorDeps<'a> {
    /// Authenticated remote filesystem.
    pub remote: &'a dyn RemoteFsPort,
    /// Local filesystem.
    pub local: &'a dyn LocalFsPort,
    /// Opens the job's failure log.
    pub failure_log: &'a dyn FailureLogPort,
    /// Progress sink.
    pub events: &'a dyn MirrorEventEmitterPort,
}

/// Mirrors remote directory trees through a set of ports.
pub struct DirectoryMirror<'a> {
    deps: MirrorDeps<'a>,
}

impl<'a> DirectoryMirror<'a> {
    /// Create a mirror over the given ports.
    pub const fn new(deps: MirrorDeps<'a>) -> Self {
        Self { deps }
    }

    /// Mirror `request.remote_root` into `request.local_root`.
    ///
    /// Returns a summary once the queue drains, however many files failed.
    pub fn download_directory(&self, request: &MirrorRequest) -> MirrorResult<MirrorSummary> {
        let root = &request.remote_root;
        tracing::info!(
            target: "sftpmirror.mirror",
            remote_root = %root,
            local_root = %request.local_root.display(),
            "Mirror job STARTED"
        );

        let mut summary = MirrorSummary::begin(root.as_str(), &request.local_root);
        self.check_root(root)?;
        let mut queue = self.list_root(root)?;

        let mut failure_log = self.deps.failure_log.open()?;
        self.ensure_local_dir(&request.local_root)?;

        self.deps.events.emit(MirrorEvent::Started {
            remote_root: root.to_string(),
            queued: queue.len(),
        });

        while let Some(cur) = queue.pop() {
            self.process_entry(
                root,
                &request.local_root,
                cur,
                &mut queue,
                failure_log.as_mut(),
                &mut summary,
            )?;
        }

        failure_log.finish()?;
        summary.record_discovered(queue.enqueued_total());
        summary.finish();

        self.deps.events.emit(MirrorEvent::Finished {
            downloaded: summary.downloaded,
            failed: summary.failed_count(),
        });
        tracing::info!(
            target: "sftpmirror.mirror",
            discovered = summary.discovered,
            directories = summary.directories,
            downloaded = summary.downloaded,
            failed = summary.failed_count(),
            bytes = summary.bytes,
            "Mirror job COMPLETED"
        );
        Ok(summary)
    }

    /// Step 1: the remote root must exist and be a directory.
    fn check_root(&self, root: &RemoteRoot) -> MirrorResult<()> {
        let meta = self
            .deps
            .remote
            .stat(root.as_str())
            .map_err(|source| MirrorError::NotFound {
                path: root.to_string(),
                source,
            })?;
        if !meta.is_directory() {
            return Err(MirrorError::NotADirectory {
                path: root.to_string(),
            });
        }
        Ok(())
    }

    /// Step 2: seed the queue from the root listing.
    fn list_root(&self, root: &RemoteRoot) -> MirrorResult<WorkQueue> {
        let names = self
            .deps
            .remote
            .list(root.as_str())
            .map_err(|source| MirrorError::Listing {
                path: root.to_string(),
                source,
            })?;
        let entries = names
            .iter()
            .filter_map(|name| valid_entry(RemotePath::top_level(name), name));
        let queue = WorkQueue::seeded(entries);
        tracing::debug!(remote_root = %root, queued = queue.len(), "Listed remote root");
        Ok(queue)
    }

    fn process_entry(
        &self,
        root: &RemoteRoot,
        local_root: &Path,
        cur: RemotePath,
        queue: &mut WorkQueue,
        failure_log: &mut dyn FailureLogWriter,
        summary: &mut MirrorSummary,
    ) -> MirrorResult<()> {
        let remote = root.resolve(&cur);
        let local = cur.to_local(local_root);

        let meta = match self.deps.remote.stat(&remote) {
            Ok(meta) => meta,
            Err(e) => {
                // Listed a moment ago; treat its disappearance as this entry's failure.
                tracing::warn!(path = %cur, error = %e, "Entry vanished before it could be classified");
                executor::record_failure(failure_log, &cur);
                self.deps.events.emit(MirrorEvent::EntrySkipped { path: cur.clone() });
                summary.record_failure(cur);
                return Ok(());
            }
        };

        if meta.is_directory() {
            self.ensure_local_dir(&local)?;
            let names = self
                .deps
                .remote
                .list(&remote)
                .map_err(|source| MirrorError::Listing {
                    path: remote.clone(),
                    source,
                })?;
            let children = queue.extend(
                names
                    .iter()
                    .filter_map(|name| valid_entry(cur.child(name), name)),
            );
            tracing::debug!(path = %cur, children, "Expanded directory");
            summary.record_directory();
            self.deps.events.emit(MirrorEvent::DirectoryEntered {
                path: cur,
                children,
            });
            return Ok(());
        }

        tracing::debug!(path = %cur, kind = ?meta.kind, "Downloading");
        self.deps
            .events
            .emit(MirrorEvent::DownloadStarted { path: cur.clone() });
        let target = DownloadTarget {
            remote,
            entry: &cur,
            local,
        };
        match executor::get_file(&self.deps, &target, failure_log) {
            FileOutcome::Downloaded { bytes } => summary.record_download(bytes),
            FileOutcome::Failed => summary.record_failure(cur),
        }
        Ok(())
    }

    fn ensure_local_dir(&self, path: &Path) -> MirrorResult<()> {
        self.deps
            .local
            .ensure_dir(path)
            .map_err(|source| MirrorError::LocalDirectory {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Keep a listed name only if it maps onto a safe relative path.
fn valid_entry(
    built: Result<RemotePath, sftpmirror_core::PathError>,
    name: &str,
) -> Option<RemotePath> {
    match built {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(name, error = %e, "Skipping listing entry");
            None
        }
    }
}
