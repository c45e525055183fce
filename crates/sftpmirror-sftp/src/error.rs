//! Session setup errors.
//!
//! Everything that can go wrong before the first remote filesystem call.
//! Errors on individual paths are reported through the port's
//! `RemoteFsError` instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for session setup.
pub type SftpResult<T> = Result<T, SftpError>;

/// Errors while establishing an authenticated SFTP session.
#[derive(Debug, Error)]
pub enum SftpError {
    /// The TCP connection could not be established.
    #[error("Could not connect to {addr}: {source}")]
    Connect {
        /// `host:port` that was dialed
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The SSH session could not be created or the handshake failed.
    #[error("SSH handshake with {addr} failed: {source}")]
    Handshake {
        /// `host:port` of the server
        addr: String,
        #[source]
        source: ssh2::Error,
    },

    /// The server did not present a host key.
    #[error("Server {host} did not provide a host key")]
    NoHostKey {
        /// Server host name
        host: String,
    },

    /// No known-hosts file was configured and no home directory exists.
    #[error("No known_hosts file available; pass one explicitly")]
    NoKnownHostsFile,

    /// The known-hosts file could not be read.
    #[error("Could not read known_hosts file {}: {source}", path.display())]
    KnownHostsRead {
        /// File that was read
        path: PathBuf,
        #[source]
        source: ssh2::Error,
    },

    /// The server is not listed in the known-hosts file.
    #[error("Host {host}:{port} is not in {}; connect once with ssh to verify it", known_hosts.display())]
    UnknownHost {
        /// Server host name
        host: String,
        /// Server port
        port: u16,
        /// File that was checked
        known_hosts: PathBuf,
    },

    /// The server's key differs from the recorded one.
    #[error("Host key for {host}:{port} does not match the known_hosts entry")]
    HostKeyMismatch {
        /// Server host name
        host: String,
        /// Server port
        port: u16,
    },

    /// libssh2 could not complete the host-key check.
    #[error("Host key check for {host} failed")]
    HostKeyCheck {
        /// Server host name
        host: String,
    },

    /// Password authentication was rejected.
    #[error("Authentication failed for {username}@{host}")]
    Authentication {
        /// Login name
        username: String,
        /// Server host name
        host: String,
        #[source]
        source: Option<ssh2::Error>,
    },

    /// The SFTP subsystem could not be started.
    #[error("Could not start SFTP subsystem: {0}")]
    Subsystem(#[source] ssh2::Error),
}
