//! CLI entry point - the composition root.

use std::process::ExitCode;

use clap::Parser;

use sftpmirror_cli::{Cli, CliConfig, handlers, init_logging};

fn main() -> ExitCode {
    // Load environment variables before clap reads its `env` fallbacks
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = CliConfig::from_cli(&cli);
    match handlers::mirror::execute(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Mirror job aborted");
            eprintln!("{e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
