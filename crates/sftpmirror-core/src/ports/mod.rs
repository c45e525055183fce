//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the traversal engine expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `ssh2` types in any signature
//! - Remote paths are plain `/`-separated strings, already resolved against
//!   the job's remote root
//! - Ports are synchronous; a job issues one call at a time
//! - With the `mocks` feature, `mockall` mocks are generated for the remote
//!   and local filesystem ports

pub mod event_emitter;
pub mod failure_log;
pub mod local_fs;
pub mod remote_fs;

pub use event_emitter::{MirrorEventEmitterPort, NoopMirrorEmitter};
pub use failure_log::{FailureLogError, FailureLogPort, FailureLogWriter};
pub use local_fs::{LocalFsError, LocalFsPort};
pub use remote_fs::{RemoteFsError, RemoteFsPort};

#[cfg(any(test, feature = "mocks"))]
pub use local_fs::MockLocalFsPort;
#[cfg(any(test, feature = "mocks"))]
pub use remote_fs::MockRemoteFsPort;
