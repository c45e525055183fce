//! Shared defaults.

/// Failure log file name, created in the current working directory.
pub const DEFAULT_FAILURE_LOG: &str = "badfiles.txt";

/// Default SSH port.
pub const DEFAULT_SSH_PORT: u16 = 22;
