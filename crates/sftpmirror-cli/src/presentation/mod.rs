//! Presentation layer for CLI output.

pub mod progress;
pub mod summary;

pub use progress::{ConsoleEmitter, progress_line};
pub use summary::{summary_json, summary_line};
