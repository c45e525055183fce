//! Entry classification.
//!
//! Remote metadata is taken with `lstat` semantics, so a symbolic link is
//! reported as itself and never expanded into a directory branch.

use serde::{Deserialize, Serialize};

/// File-type mask of a POSIX mode (`S_IFMT`).
const S_IFMT: u32 = 0o170_000;
const S_IFDIR: u32 = 0o040_000;
const S_IFREG: u32 = 0o100_000;

/// What a remote entry is, as far as traversal is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Expanded into its children.
    Directory,
    /// Regular file, downloaded.
    File,
    /// Symlink, socket, device, FIFO or unknown. Downloaded like a file and
    /// allowed to fail naturally if the transfer is unsupported.
    Other,
}

impl EntryKind {
    /// Classify from the file-type bits of a POSIX mode.
    #[must_use]
    pub const fn from_mode(mode: u32) -> Self {
        match mode & S_IFMT {
            S_IFDIR => Self::Directory,
            S_IFREG => Self::File,
            _ => Self::Other,
        }
    }

    /// Check if this entry is expanded rather than downloaded.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// Metadata for a single remote entry at the moment it was queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMeta {
    /// Classification derived from the mode bits.
    pub kind: EntryKind,
    /// Size in bytes, if the server reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Full mode (type and permission bits), if the server reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<u32>,
}

impl EntryMeta {
    /// Build metadata from a raw mode, as most SFTP servers report it.
    #[must_use]
    pub const fn from_mode(mode: u32, size: Option<u64>) -> Self {
        Self {
            kind: EntryKind::from_mode(mode),
            size,
            permissions: Some(mode),
        }
    }

    /// Metadata with a known kind and nothing else.
    #[must_use]
    pub const fn of_kind(kind: EntryKind) -> Self {
        Self {
            kind,
            size: None,
            permissions: None,
        }
    }

    /// Directory metadata.
    #[must_use]
    pub const fn directory() -> Self {
        Self::of_kind(EntryKind::Directory)
    }

    /// Regular file metadata with a size.
    #[must_use]
    pub const fn file(size: u64) -> Self {
        Self {
            kind: EntryKind::File,
            size: Some(size),
            permissions: None,
        }
    }

    /// Check if this entry is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }
}
