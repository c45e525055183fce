//! Command-line parser.
//!
//! A single command: every option that has a sensible environment variable
//! can also be set through it (or through a `.env` file).

use std::path::PathBuf;

use clap::Parser;

/// Recursively download a remote directory over SFTP.
///
/// Files that fail to transfer are listed in the failure log instead of
/// stopping the run.
#[derive(Debug, Parser)]
#[command(name = "sftpmirror")]
#[command(about = "Recursively download a remote directory over SFTP")]
#[command(version)]
pub struct Cli {
    /// Login name on the server
    pub username: String,

    /// Server host name or address
    pub hostname: String,

    /// Remote directory to download
    pub directory: String,

    /// Local directory to mirror into
    pub output: PathBuf,

    /// SSH port
    #[arg(short = 'p', long, env = "SFTPMIRROR_PORT", default_value_t = sftpmirror_core::DEFAULT_SSH_PORT)]
    pub port: u16,

    /// Known-hosts file used to verify the server [default: ~/.ssh/known_hosts]
    #[arg(long = "known-hosts", env = "SFTPMIRROR_KNOWN_HOSTS", value_name = "FILE")]
    pub known_hosts: Option<PathBuf>,

    /// Where to list files that could not be downloaded
    #[arg(
        long = "failure-log",
        env = "SFTPMIRROR_FAILURE_LOG",
        value_name = "FILE",
        default_value = sftpmirror_core::DEFAULT_FAILURE_LOG
    )]
    pub failure_log: PathBuf,

    /// Network timeout in seconds
    #[arg(long = "timeout-secs", env = "SFTPMIRROR_TIMEOUT_SECS", value_name = "N")]
    pub timeout_secs: Option<u64>,

    /// Print the job summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
