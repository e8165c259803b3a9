//! Change events and build requests
//!
//! A build request is what the driver (CLI or watcher) hands to the
//! orchestrator: an `initial` flag plus the ordered changes observed since
//! the previous build.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Kind of filesystem change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

impl ChangeKind {
    /// Added or modified - the file exists and has (new) content
    pub fn is_update(self) -> bool {
        matches!(self, ChangeKind::Added | ChangeKind::Modified)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "added"),
            ChangeKind::Modified => write!(f, "modified"),
            ChangeKind::Removed => write!(f, "removed"),
        }
    }
}

/// A single change to a path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn added(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Added, path)
    }

    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Modified, path)
    }

    pub fn removed(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Removed, path)
    }

    /// Whether this change touches a path under `root`
    pub fn is_under(&self, root: &Path) -> bool {
        self.path.starts_with(root)
    }
}

/// One logical build: initial (full) or incremental
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRequest {
    pub initial: bool,
    pub changes: Vec<ChangeEvent>,
}

impl BuildRequest {
    /// Full build of every page
    pub fn initial() -> Self {
        Self {
            initial: true,
            changes: Vec::new(),
        }
    }

    /// Incremental build driven by `changes`
    pub fn incremental(changes: Vec<ChangeEvent>) -> Self {
        Self {
            initial: false,
            changes,
        }
    }

    /// Changes that touch a path under `root`
    pub fn changes_under<'a>(&'a self, root: &'a Path) -> impl Iterator<Item = &'a ChangeEvent> {
        self.changes.iter().filter(move |c| c.is_under(root))
    }
}
