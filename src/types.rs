/*!
 * Core types for the proj2prompt traversal
 */

use std::path::PathBuf;

/// Kind of a visited filesystem node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory whose children are visited next
    Directory,
    /// Regular file, rendered through the content sampler
    File,
    /// Symbolic link to a file, rendered through the link
    FileLink,
    /// Symbolic link to a directory, never descended
    DirectoryLink,
    /// FIFO, socket or device, never opened
    Special,
}

impl EntryKind {
    /// Whether the entry gets a directory header
    pub fn is_dir(self) -> bool {
        self == Self::Directory
    }
}

/// A single visited node, discarded once rendered
#[derive(Debug, Clone)]
pub struct TraversalEntry {
    /// Path as seen by the walker
    pub path: PathBuf,
    /// Path relative to the root, `/`-separated, `.` for the root itself
    pub relative_path: String,
    /// Base name of the entry
    pub name: String,
    /// What the entry is
    pub kind: EntryKind,
    /// Size in bytes (of the link target for file links)
    pub size: u64,
}
