//! Host-key verification against an OpenSSH known-hosts file.
//!
//! Unknown hosts are rejected, never added.

use std::path::Path;

use ssh2::{CheckResult, KnownHostFileKind, Session};

use crate::error::{SftpError, SftpResult};

/// Verify the key the server presented during the handshake.
pub(crate) fn verify(session: &Session, host: &str, port: u16, known_hosts: &Path) -> SftpResult<()> {
    let (key, key_type) = session.host_key().ok_or_else(|| SftpError::NoHostKey {
        host: host.to_string(),
    })?;
    tracing::debug!(host, port, key_type = ?key_type, "Checking host key");
    check(session, host, port, known_hosts, key)
}

fn check(session: &Session, host: &str, port: u16, known_hosts: &Path, key: &[u8]) -> SftpResult<()> {
    let read_err = |source| SftpError::KnownHostsRead {
        path: known_hosts.to_path_buf(),
        source,
    };
    let mut hosts = session.known_hosts().map_err(read_err)?;
    let entries = hosts
        .read_file(known_hosts, KnownHostFileKind::OpenSSH)
        .map_err(read_err)?;
    tracing::debug!(path = %known_hosts.display(), entries, "Loaded known_hosts");

    match hosts.check_port(host, port, key) {
        CheckResult::Match => Ok(()),
        CheckResult::NotFound => Err(SftpError::UnknownHost {
            host: host.to_string(),
            port,
            known_hosts: known_hosts.to_path_buf(),
        }),
        CheckResult::Mismatch => Err(SftpError::HostKeyMismatch {
            host: host.to_string(),
            port,
        }),
        CheckResult::Failure => Err(SftpError::HostKeyCheck {
            host: host.to_string(),
        }),
    }
}
