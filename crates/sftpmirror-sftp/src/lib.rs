//! SSH/SFTP adapter for sftpmirror.
//!
//! Opens one authenticated SFTP session over `ssh2` and exposes it through
//! the [`RemoteFsPort`](sftpmirror_core::RemoteFsPort) trait the traversal
//! engine consumes. Transport errors stay inside this crate as
//! [`SftpError`] (session setup) or are mapped to
//! [`RemoteFsError`](sftpmirror_core::RemoteFsError) at the port boundary.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod host_keys;

// ============================================================================
// Public API
// ============================================================================

// Session
pub use client::SftpConnection;

// Configuration
pub use config::SftpConfig;

// Errors
pub use error::{SftpError, SftpResult};
