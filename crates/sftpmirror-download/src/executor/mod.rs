//! The single-file download step.
//!
//! This is where transfer errors stop. Whatever the remote port reports, the
//! caller only learns whether the file arrived; a failure becomes a record in
//! the failure log plus a `DownloadFailed` event.

use std::path::PathBuf;

use sftpmirror_core::ports::FailureLogWriter;
use sftpmirror_core::{MirrorEvent, RemotePath};

use crate::engine::MirrorDeps;

/// One file to transfer.
#[derive(Debug, Clone)]
pub struct DownloadTarget<'a> {
    /// Full remote path (root already prepended).
    pub remote: String,
    /// Relative identifier, as written to the failure log.
    pub entry: &'a RemotePath,
    /// Local destination.
    pub local: PathBuf,
}

/// Outcome of one download step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was transferred completely.
    Downloaded {
        /// Bytes written locally.
        bytes: u64,
    },
    /// The transfer failed and the entry was logged.
    Failed,
}

impl FileOutcome {
    /// Check if the file arrived.
    #[must_use]
    pub const fn succeeded(self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }
}

/// Attempt exactly one file transfer.
///
/// Never returns an error: a failed transfer removes any partial local file,
/// appends `target.entry` to `failure_log`, and yields [`FileOutcome::Failed`].
pub fn get_file(
    deps: &MirrorDeps<'_>,
    target: &DownloadTarget<'_>,
    failure_log: &mut dyn FailureLogWriter,
) -> FileOutcome {
    match deps.remote.download(&target.remote, &target.local) {
        Ok(bytes) => {
            tracing::debug!(path = %target.entry, bytes, "Download completed");
            deps.events.emit(MirrorEvent::DownloadCompleted {
                path: target.entry.clone(),
                bytes,
            });
            FileOutcome::Downloaded { bytes }
        }
        Err(e) => {
            // The cause stays in debug logs; callers only see the outcome.
            tracing::debug!(path = %target.entry, error = %e, "Transfer error");
            tracing::warn!(path = %target.entry, "Download failed");

            if let Err(cleanup) = deps.local.remove_partial(&target.local) {
                tracing::warn!(
                    path = %target.local.display(),
                    error = %cleanup,
                    "Could not remove partial download"
                );
            }
            record_failure(failure_log, target.entry);
            deps.events.emit(MirrorEvent::DownloadFailed {
                path: target.entry.clone(),
            });
            FileOutcome::Failed
        }
    }
}

/// Append an entry to the failure log without letting a log error escape.
pub(crate) fn record_failure(failure_log: &mut dyn FailureLogWriter, entry: &RemotePath) {
    if let Err(e) = failure_log.record(entry) {
        tracing::error!(path = %entry, error = %e, "Failed to append to failure log");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;

    use sftpmirror_core::ports::{
        FailureLogError, FailureLogPort, MockLocalFsPort, MockRemoteFsPort,
    };
    use sftpmirror_core::{MirrorEventEmitterPort, RemoteFsError};

    use super::*;

    #[derive(Default)]
    struct VecLog {
        lines: Vec<String>,
        fail_writes: bool,
    }

    impl FailureLogWriter for VecLog {
        fn record(&mut self, path: &RemotePath) -> Result<(), FailureLogError> {
            if self.fail_writes {
                return Err(FailureLogError::Write(std::io::Error::other("disk full")));
            }
            self.lines.push(path.to_string());
            Ok(())
        }

        fn finish(&mut self) -> Result<(), FailureLogError> {
            Ok(())
        }
    }

    struct UnusedLogPort;

    impl FailureLogPort for UnusedLogPort {
        fn open(&self) -> Result<Box<dyn FailureLogWriter>, FailureLogError> {
            unreachable!("download step never opens the log")
        }
    }

    #[derive(Default)]
    struct Events(RefCell<Vec<MirrorEvent>>);

    impl MirrorEventEmitterPort for Events {
        fn emit(&self, event: MirrorEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    fn entry() -> RemotePath {
        RemotePath::top_level("sub").unwrap().child("y.txt").unwrap()
    }

    fn target(entry: &RemotePath) -> DownloadTarget<'_> {
        DownloadTarget {
            remote: "/data/sub/y.txt".to_string(),
            entry,
            local: PathBuf::from("out/sub/y.txt"),
        }
    }

    #[test]
    fn test_success_returns_bytes_and_logs_nothing() {
        let mut remote = MockRemoteFsPort::new();
        remote
            .expect_download()
            .withf(|remote, local| remote == "/data/sub/y.txt" && local == Path::new("out/sub/y.txt"))
            .times(1)
            .returning(|_, _| Ok(42));
        let mut local = MockLocalFsPort::new();
        local.expect_remove_partial().never();
        let events = Events::default();
        let deps = MirrorDeps {
            remote: &remote,
            local: &local,
            failure_log: &UnusedLogPort,
            events: &events,
        };
        let mut log = VecLog::default();
        let entry = entry();

        let outcome = get_file(&deps, &target(&entry), &mut log);

        assert_eq!(outcome, FileOutcome::Downloaded { bytes: 42 });
        assert!(outcome.succeeded());
        assert!(log.lines.is_empty());
        assert_eq!(
            events.0.borrow().as_slice(),
            &[MirrorEvent::DownloadCompleted {
                path: entry.clone(),
                bytes: 42
            }]
        );
    }

    #[test]
    fn test_failure_is_absorbed_and_logged_once() {
        let mut remote = MockRemoteFsPort::new();
        remote
            .expect_download()
            .times(1)
            .returning(|remote, _| Err(RemoteFsError::permission_denied(remote)));
        let mut local = MockLocalFsPort::new();
        local
            .expect_remove_partial()
            .withf(|path| path == Path::new("out/sub/y.txt"))
            .times(1)
            .returning(|_| Ok(()));
        let events = Events::default();
        let deps = MirrorDeps {
            remote: &remote,
            local: &local,
            failure_log: &UnusedLogPort,
            events: &events,
        };
        let mut log = VecLog::default();
        let entry = entry();

        let outcome = get_file(&deps, &target(&entry), &mut log);

        assert_eq!(outcome, FileOutcome::Failed);
        assert!(!outcome.succeeded());
        assert_eq!(log.lines, vec!["sub/y.txt"]);
        assert_eq!(
            events.0.borrow().as_slice(),
            &[MirrorEvent::DownloadFailed { path: entry.clone() }]
        );
    }

    #[test]
    fn test_cleanup_and_log_errors_do_not_escape() {
        let mut remote = MockRemoteFsPort::new();
        remote
            .expect_download()
            .returning(|remote, _| Err(RemoteFsError::protocol(remote, "eof")));
        let mut local = MockLocalFsPort::new();
        local.expect_remove_partial().returning(|path| {
            Err(sftpmirror_core::LocalFsError::RemoveFailed {
                path: path.to_path_buf(),
                reason: "busy".to_string(),
            })
        });
        let events = Events::default();
        let deps = MirrorDeps {
            remote: &remote,
            local: &local,
            failure_log: &UnusedLogPort,
            events: &events,
        };
        let mut log = VecLog {
            fail_writes: true,
            ..VecLog::default()
        };
        let entry = entry();

        assert_eq!(get_file(&deps, &target(&entry), &mut log), FileOutcome::Failed);
        assert!(log.lines.is_empty());
        assert_eq!(events.0.borrow().len(), 1);
    }
}
