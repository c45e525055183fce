//! Mirror handler.
//!
//! Connects, runs one mirror job through the download engine and reports
//! the result. Per-file failures only show up in the report; anything
//! returned as an error ended the job.

use std::io::Write;

use sftpmirror_core::{MirrorEventEmitterPort, MirrorSummary};
use sftpmirror_download::{DirectoryMirror, FileFailureLog, MirrorDeps, StdLocalFs};
use sftpmirror_sftp::SftpConnection;

use crate::bootstrap::CliConfig;
use crate::error::CliError;
use crate::presentation::{ConsoleEmitter, summary_json, summary_line};

/// Execute the mirror command.
pub fn execute(config: &CliConfig) -> Result<MirrorSummary, CliError> {
    let password = config.password()?;
    tracing::debug!(
        host = config.sftp.host(),
        port = config.sftp.port(),
        "Connecting"
    );
    let connection = SftpConnection::connect(&config.sftp, &password)?;

    let emitter = ConsoleEmitter::new();
    let result = run(config, &connection, &emitter);
    connection.disconnect();

    Ok(conclude(config, result?, &mut std::io::stdout()))
}

/// Report a drained job. The job already succeeded, so a report that cannot
/// be written (closed stdout, broken pipe) is only logged.
pub fn conclude(config: &CliConfig, summary: MirrorSummary, out: &mut dyn Write) -> MirrorSummary {
    if let Err(e) = report(config, &summary, out) {
        tracing::warn!(error = %e, "Could not print the job summary");
    }
    summary
}

/// Run the job against an already connected remote.
pub fn run(
    config: &CliConfig,
    remote: &dyn sftpmirror_core::RemoteFsPort,
    events: &dyn MirrorEventEmitterPort,
) -> Result<MirrorSummary, CliError> {
    let local = StdLocalFs::new();
    let failure_log = FileFailureLog::new(&config.failure_log);
    let deps = MirrorDeps {
        remote,
        local: &local,
        failure_log: &failure_log,
        events,
    };
    Ok(DirectoryMirror::new(deps).download_directory(&config.request)?)
}

/// Print the end-of-job report.
pub fn report(
    config: &CliConfig,
    summary: &MirrorSummary,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if config.json {
        let json = summary_json(summary).map_err(|e| CliError::Io(e.to_string()))?;
        writeln!(out, "{json}")?;
    } else {
        writeln!(out, "{}", summary_line(summary, &config.failure_log))?;
    }
    Ok(())
}
