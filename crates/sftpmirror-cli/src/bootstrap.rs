//! CLI bootstrap - configuration and logging setup.
//!
//! Turns parsed arguments into the settings the handler needs. Nothing here
//! touches the network.

use std::path::PathBuf;
use std::time::Duration;

use sftpmirror_core::MirrorRequest;
use sftpmirror_sftp::SftpConfig;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::parser::Cli;

/// Environment variable consulted before prompting for a password.
pub const PASSWORD_ENV: &str = "SFTPMIRROR_PASSWORD";

/// Bootstrap configuration for one run.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Session settings.
    pub sftp: SftpConfig,
    /// What to mirror where.
    pub request: MirrorRequest,
    /// Failure log location.
    pub failure_log: PathBuf,
    /// Print the summary as JSON.
    pub json: bool,
}

impl CliConfig {
    /// Build the run configuration from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut sftp = SftpConfig::new(&cli.hostname, &cli.username)
            .with_port(cli.port)
            .with_optional_timeout(cli.timeout_secs.map(Duration::from_secs));
        if let Some(path) = &cli.known_hosts {
            sftp = sftp.with_known_hosts(path);
        }

        Self {
            sftp,
            request: MirrorRequest::new(&cli.directory, &cli.output),
            failure_log: cli.failure_log.clone(),
            json: cli.json,
        }
    }

    /// Password from the environment, or an interactive no-echo prompt.
    pub fn password(&self) -> Result<String, CliError> {
        if let Ok(password) = std::env::var(PASSWORD_ENV) {
            return Ok(password);
        }
        let prompt = format!("{}@{}'s password: ", self.sftp.username(), self.sftp.host());
        Ok(rpassword::prompt_password(prompt)?)
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so they never interleave with progress on stdout.
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
