//! Command-line front end for sftpmirror.
//!
//! `main.rs` is the composition root; this library holds the pieces it
//! wires together so they can be tested without a terminal or a server.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used only by the binary
use dotenvy as _;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, init_logging};
pub use error::CliError;
pub use parser::Cli;
