//! The authenticated SFTP session and its `RemoteFsPort` implementation.

use std::fs::File;
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::Path;

use sftpmirror_core::{EntryKind, EntryMeta, RemoteFsError, RemoteFsPort};
use ssh2::{ErrorCode, FileStat, Session, Sftp};

use crate::config::SftpConfig;
use crate::error::{SftpError, SftpResult};
use crate::host_keys;

/// `SSH_FX_NO_SUCH_FILE`
const FX_NO_SUCH_FILE: i32 = 2;
/// `SSH_FX_PERMISSION_DENIED`
const FX_PERMISSION_DENIED: i32 = 3;
/// `SSH_FX_NO_SUCH_PATH`
const FX_NO_SUCH_PATH: i32 = 10;

const COPY_BUFFER_SIZE: usize = 32 * 1024;

/// One authenticated SFTP session.
///
/// Calls are blocking and run one at a time over the single channel.
pub struct SftpConnection {
    // Field order matters: the SFTP channel is closed before its session.
    sftp: Sftp,
    session: Session,
    host: String,
}

impl SftpConnection {
    /// Connect, verify the host key, authenticate with `password` and start
    /// the SFTP subsystem.
    pub fn connect(config: &SftpConfig, password: &str) -> SftpResult<Self> {
        let addr = config.address();
        let tcp = open_tcp(config)?;
        tracing::debug!(%addr, "TCP connection established");

        let handshake_err = |source| SftpError::Handshake {
            addr: addr.clone(),
            source,
        };
        let mut session = Session::new().map_err(handshake_err)?;
        session.set_tcp_stream(tcp);
        session.set_timeout(config.timeout_millis());
        session.handshake().map_err(handshake_err)?;

        let known_hosts = config.known_hosts().ok_or(SftpError::NoKnownHostsFile)?;
        host_keys::verify(&session, config.host(), config.port(), known_hosts)?;

        let auth_err = |source| SftpError::Authentication {
            username: config.username().to_string(),
            host: config.host().to_string(),
            source,
        };
        session
            .userauth_password(config.username(), password)
            .map_err(|e| auth_err(Some(e)))?;
        if !session.authenticated() {
            return Err(auth_err(None));
        }

        let sftp = session.sftp().map_err(SftpError::Subsystem)?;
        tracing::info!(
            target: "sftpmirror.sftp",
            %addr,
            username = config.username(),
            "SFTP session established"
        );

        Ok(Self {
            sftp,
            session,
            host: config.host().to_string(),
        })
    }

    /// Close the session politely. Errors are only logged.
    pub fn disconnect(self) {
        if let Err(e) = self.session.disconnect(None, "mirror complete", None) {
            tracing::debug!(host = %self.host, error = %e, "Disconnect failed");
        }
    }
}

impl std::fmt::Debug for SftpConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SftpConnection")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl RemoteFsPort for SftpConnection {
    fn stat(&self, path: &str) -> Result<EntryMeta, RemoteFsError> {
        self.sftp
            .lstat(Path::new(path))
            .map(|stat| entry_meta(&stat))
            .map_err(|e| map_remote_error(&e, path))
    }

    fn list(&self, path: &str) -> Result<Vec<String>, RemoteFsError> {
        let entries = self
            .sftp
            .readdir(Path::new(path))
            .map_err(|e| map_remote_error(&e, path))?;
        Ok(entries
            .into_iter()
            .filter_map(|(child, _)| listing_name(&child))
            .collect())
    }

    fn download(&self, remote: &str, local: &Path) -> Result<u64, RemoteFsError> {
        let mut source = self
            .sftp
            .open(Path::new(remote))
            .map_err(|e| map_remote_error(&e, remote))?;
        let mut dest =
            File::create(local).map_err(|e| RemoteFsError::local_write(remote, e.to_string()))?;
        copy_stream(&mut source, &mut dest, remote)
    }
}

fn open_tcp(config: &SftpConfig) -> SftpResult<TcpStream> {
    let connect_err = |source| SftpError::Connect {
        addr: config.address(),
        source,
    };
    let Some(timeout) = config.timeout else {
        return TcpStream::connect((config.host(), config.port())).map_err(connect_err);
    };

    let mut last_error = None;
    for addr in (config.host(), config.port())
        .to_socket_addrs()
        .map_err(connect_err)?
    {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_error = Some(e),
        }
    }
    Err(connect_err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "host name resolved to no addresses")
    })))
}

/// Classify an `lstat` result. A missing mode means the server would not
/// say, so the entry is treated as a non-directory.
fn entry_meta(stat: &FileStat) -> EntryMeta {
    match stat.perm {
        Some(mode) => EntryMeta::from_mode(mode, stat.size),
        None => EntryMeta::of_kind(EntryKind::Other),
    }
}

/// The name a listing entry is queued under.
///
/// Port paths are UTF-8, so a name that is not is replaced lossily. The
/// mangled name no longer exists on the server: its `lstat` fails and the
/// entry ends up in the failure log under the replacement-character form.
fn listing_name(child: &Path) -> Option<String> {
    let name = child.file_name()?;
    if let Some(utf8) = name.to_str() {
        return Some(utf8.to_string());
    }
    let lossy = name.to_string_lossy().into_owned();
    tracing::warn!(
        raw = ?name,
        name = %lossy,
        "Remote name is not valid UTF-8 and cannot be retrieved"
    );
    Some(lossy)
}

/// Map an `ssh2` error onto the port's error type.
fn map_remote_error(err: &ssh2::Error, path: &str) -> RemoteFsError {
    match err.code() {
        ErrorCode::SFTP(FX_NO_SUCH_FILE | FX_NO_SUCH_PATH) => RemoteFsError::not_found(path),
        ErrorCode::SFTP(FX_PERMISSION_DENIED) => RemoteFsError::permission_denied(path),
        _ => RemoteFsError::protocol(path, err.message()),
    }
}

/// Stream `reader` into `writer`, keeping read-side and write-side failures
/// apart.
fn copy_stream(
    reader: &mut impl Read,
    writer: &mut impl Write,
    remote: &str,
) -> Result<u64, RemoteFsError> {
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(RemoteFsError::protocol(remote, e.to_string())),
        };
        writer
            .write_all(&buf[..n])
            .map_err(|e| RemoteFsError::local_write(remote, e.to_string()))?;
        total += n as u64;
    }
    writer
        .flush()
        .map_err(|e| RemoteFsError::local_write(remote, e.to_string()))?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn sftp_error(code: i32) -> ssh2::Error {
        ssh2::Error::new(ErrorCode::SFTP(code), "server said no")
    }

    #[test]
    fn test_missing_paths_map_to_not_found() {
        for code in [FX_NO_SUCH_FILE, FX_NO_SUCH_PATH] {
            let mapped = map_remote_error(&sftp_error(code), "/data/x");
            assert_eq!(mapped, RemoteFsError::not_found("/data/x"));
            assert!(mapped.is_not_found());
        }
    }

    #[test]
    fn test_permission_denied_mapping() {
        assert_eq!(
            map_remote_error(&sftp_error(FX_PERMISSION_DENIED), "/root"),
            RemoteFsError::permission_denied("/root")
        );
    }

    #[test]
    fn test_other_errors_keep_the_message() {
        let session_err = ssh2::Error::new(ErrorCode::Session(-7), "socket send failed");
        assert_eq!(
            map_remote_error(&session_err, "/data"),
            RemoteFsError::protocol("/data", "socket send failed")
        );
        // SSH_FX_FAILURE
        assert!(matches!(
            map_remote_error(&sftp_error(4), "/data"),
            RemoteFsError::Protocol { .. }
        ));
    }

    #[test]
    fn test_entry_meta_from_stat() {
        let stat = |perm, size| FileStat {
            size,
            uid: None,
            gid: None,
            perm,
            atime: None,
            mtime: None,
        };

        assert!(entry_meta(&stat(Some(0o040_755), None)).is_directory());
        let file = entry_meta(&stat(Some(0o100_644), Some(12)));
        assert_eq!(file.kind, EntryKind::File);
        assert_eq!(file.size, Some(12));
        assert_eq!(entry_meta(&stat(Some(0o120_777), Some(4))).kind, EntryKind::Other);
        assert_eq!(entry_meta(&stat(None, Some(1))).kind, EntryKind::Other);
    }

    #[test]
    fn test_listing_name_takes_last_component() {
        assert_eq!(
            listing_name(Path::new("/data/sub/y.txt")).as_deref(),
            Some("y.txt")
        );
        assert_eq!(listing_name(Path::new("/")), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_listing_name_is_replaced_lossily() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let child = Path::new("/data").join(OsStr::from_bytes(b"caf\xe9.txt"));
        assert_eq!(listing_name(&child).as_deref(), Some("caf\u{fffd}.txt"));
    }

    #[test]
    fn test_copy_stream_counts_bytes() {
        let data = vec![7u8; COPY_BUFFER_SIZE * 2 + 5];
        let mut out = Vec::new();
        let copied = copy_stream(&mut Cursor::new(data.clone()), &mut out, "/f").unwrap();
        assert_eq!(copied, data.len() as u64);
        assert_eq!(out, data);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_copy_stream_separates_read_and_write_failures() {
        let read_err = copy_stream(&mut FailingReader, &mut Vec::new(), "/f").unwrap_err();
        assert!(matches!(read_err, RemoteFsError::Protocol { .. }));

        let write_err = copy_stream(&mut Cursor::new(b"abc".to_vec()), &mut FullDisk, "/f")
            .unwrap_err();
        assert!(matches!(write_err, RemoteFsError::LocalWrite { ref path, .. } if path == "/f"));
    }
}
