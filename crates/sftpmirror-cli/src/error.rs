//! CLI-specific error types and mappings.
//!
//! Maps session and mirror errors to exit codes and user-facing messages.

use sftpmirror_core::MirrorError;
use sftpmirror_sftp::SftpError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The remote directory does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The server could not be reached or spoke no usable SSH.
    #[error("{0}")]
    Connection(String),

    /// Host key verification or authentication failed.
    #[error("{0}")]
    Access(String),

    /// Local IO error (output directory, failure log, password prompt).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other fatal mirror error.
    #[error("{0}")]
    Mirror(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success (including runs where some files failed)
    /// - 1: General error
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Mirror(_) => 1,
            Self::NotFound(_) => 66,   // EX_NOINPUT
            Self::Connection(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,         // EX_IOERR
            Self::Access(_) => 77,     // EX_NOPERM
            Self::Config(_) => 78,     // EX_CONFIG
        }
    }
}

impl From<MirrorError> for CliError {
    fn from(err: MirrorError) -> Self {
        match err {
            MirrorError::NotFound { .. } => Self::NotFound(err.to_string()),
            MirrorError::LocalDirectory { .. } | MirrorError::FailureLog(_) => {
                Self::Io(error_chain(&err))
            }
            MirrorError::NotADirectory { .. } | MirrorError::Listing { .. } => {
                Self::Mirror(error_chain(&err))
            }
        }
    }
}

impl From<SftpError> for CliError {
    fn from(err: SftpError) -> Self {
        match err {
            SftpError::Connect { .. } | SftpError::Handshake { .. } | SftpError::Subsystem(_) => {
                Self::Connection(err.to_string())
            }
            SftpError::NoKnownHostsFile | SftpError::KnownHostsRead { .. } => {
                Self::Config(err.to_string())
            }
            SftpError::NoHostKey { .. }
            | SftpError::UnknownHost { .. }
            | SftpError::HostKeyMismatch { .. }
            | SftpError::HostKeyCheck { .. }
            | SftpError::Authentication { .. } => Self::Access(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Render an error with its sources, `outer: inner: ...`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
