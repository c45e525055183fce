//! Connection settings for an SFTP session.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sftpmirror_core::DEFAULT_SSH_PORT;

/// Where and as whom to connect.
///
/// Use the builder methods to customize the configuration.
///
/// # Example
///
/// ```
/// use sftpmirror_sftp::SftpConfig;
/// use std::time::Duration;
///
/// let config = SftpConfig::new("files.example.org", "alice")
///     .with_port(2222)
///     .with_timeout(Duration::from_secs(30));
/// assert_eq!(config.address(), "files.example.org:2222");
/// ```
#[derive(Debug, Clone)]
pub struct SftpConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) username: String,
    /// `None` only when no home directory could be determined.
    pub(crate) known_hosts: Option<PathBuf>,
    /// Applies to the TCP connect and to every blocking libssh2 call.
    pub(crate) timeout: Option<Duration>,
}

impl SftpConfig {
    /// Create a configuration with the default port and known-hosts file.
    #[must_use]
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SSH_PORT,
            username: username.into(),
            known_hosts: default_known_hosts(),
            timeout: None,
        }
    }

    /// Set the SSH port.
    ///
    /// Defaults to 22.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Verify the server against this known-hosts file.
    ///
    /// Defaults to `~/.ssh/known_hosts`.
    #[must_use]
    pub fn with_known_hosts(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts = Some(path.into());
        self
    }

    /// Set a network timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set an optional network timeout.
    #[must_use]
    pub const fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Remote host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Remote port.
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Known-hosts file, if one is configured or could be defaulted.
    pub fn known_hosts(&self) -> Option<&Path> {
        self.known_hosts.as_deref()
    }

    /// `host:port` as passed to the resolver.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout in the millisecond form libssh2 expects (0 disables it).
    pub(crate) fn timeout_millis(&self) -> u32 {
        self.timeout
            .map_or(0, |t| u32::try_from(t.as_millis()).unwrap_or(u32::MAX))
    }
}

fn default_known_hosts() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("known_hosts"))
}
