//! Mirror job types.
//!
//! Pure data types shared by the engine and its front ends. No I/O here.
//!
//! - `request` - what to mirror and where
//! - `events` - progress events emitted during a job
//! - `summary` - the report returned when a job completes
//! - `errors` - fatal, job-aborting errors

pub mod errors;
pub mod events;
pub mod request;
pub mod summary;

pub use errors::{MirrorError, MirrorResult};
pub use events::MirrorEvent;
pub use request::MirrorRequest;
pub use summary::MirrorSummary;
