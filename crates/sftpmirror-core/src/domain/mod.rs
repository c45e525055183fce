//! Domain types for remote trees.
//!
//! - `path` - relative remote paths and the explicit remote root
//! - `entry` - entry classification from remote metadata

pub mod entry;
pub mod path;

pub use entry::{EntryKind, EntryMeta};
pub use path::{PathError, RemotePath, RemoteRoot};
