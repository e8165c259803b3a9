//! Watch event types, options and change bookkeeping

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use ignore::WalkBuilder;
use notify::event::{ModifyKind, RemoveKind, RenameMode};
use notify::EventKind;

use crate::domain::entities::PageCache;
use crate::domain::value_objects::{ChangeEvent, ChangeKind};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Directory names never worth rebuilding for
const IGNORED_DIRS: &[&str] = &["node_modules"];

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Directory watched recursively
    pub project_root: PathBuf,
    /// Destination directory; changes under it are ignored
    pub out_dir: PathBuf,
    /// Public directory, mirrored verbatim, hidden files included
    pub public_dir: Option<PathBuf>,
}

impl WatchOptions {
    pub fn new(project_root: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            out_dir: out_dir.into(),
            public_dir: None,
        }
    }

    pub fn with_public_dir(mut self, public_dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(public_dir.into());
        self
    }

    /// Whether a change to `path` should be dropped before it reaches a build
    ///
    /// Paths under the destination, hidden paths (any component relative to
    /// the project root starting with `.`) and dependency folders are ignored.
    /// Nothing under the public directory is ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        if path.starts_with(&self.out_dir) {
            return true;
        }
        if self.is_public(path) {
            return false;
        }

        let relative = path.strip_prefix(&self.project_root).unwrap_or(path);
        relative.components().any(|component| match component {
            Component::Normal(name) => {
                let name = name.to_string_lossy();
                name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
            }
            _ => false,
        })
    }

    fn is_public(&self, path: &Path) -> bool {
        self.public_dir
            .as_ref()
            .is_some_and(|public| path.starts_with(public))
    }

    /// Destination copy of a directory below the public root
    fn public_mirror(&self, dir: &Path) -> Option<PathBuf> {
        let public = self.public_dir.as_ref()?;
        let relative = dir.strip_prefix(public).ok()?;
        if relative.as_os_str().is_empty() {
            return None;
        }
        Some(self.out_dir.join(relative))
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        root: String,
    },
    FileChanged {
        path: String,
        kind: ChangeKind,
    },
    BuildStarted {
        initial: bool,
        changes: usize,
    },
    BuildComplete {
        pages: usize,
        written: usize,
        deleted: usize,
        assets: usize,
    },
    Error {
        message: String,
    },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Translate one notify event into change events
///
/// Folder removals are dropped; the files inside them arrive as their own
/// events. Access and unclassified events carry no content change.
pub fn classify(kind: &EventKind, paths: &[PathBuf]) -> Vec<ChangeEvent> {
    match kind {
        EventKind::Create(_) => paths.iter().map(ChangeEvent::added).collect(),
        EventKind::Remove(RemoveKind::Folder) => Vec::new(),
        EventKind::Remove(_) => paths.iter().map(ChangeEvent::removed).collect(),
        EventKind::Modify(ModifyKind::Name(mode)) => classify_rename(*mode, paths),
        EventKind::Modify(_) | EventKind::Any => paths.iter().map(ChangeEvent::modified).collect(),
        EventKind::Access(_) | EventKind::Other => Vec::new(),
    }
}

fn classify_rename(mode: RenameMode, paths: &[PathBuf]) -> Vec<ChangeEvent> {
    match mode {
        RenameMode::From => paths.iter().map(ChangeEvent::removed).collect(),
        RenameMode::To => paths.iter().map(ChangeEvent::added).collect(),
        RenameMode::Both => match paths {
            [from, to] => vec![ChangeEvent::removed(from), ChangeEvent::added(to)],
            _ => paths.iter().map(ChangeEvent::modified).collect(),
        },
        // Platforms that cannot tell the two halves apart
        RenameMode::Any | RenameMode::Other => paths
            .iter()
            .map(|path| {
                if path.exists() {
                    ChangeEvent::added(path)
                } else {
                    ChangeEvent::removed(path)
                }
            })
            .collect(),
    }
}

/// Replace a change to a whole directory with changes to the files it held
///
/// A directory moved in arrives as one event for the directory; every file
/// below it becomes `Added`. A directory moved away cannot be listed any more,
/// so its files are recovered from the cache (pages) and from the
/// destination copy (public assets). Anything else passes through.
pub(crate) fn expand_directory(
    change: ChangeEvent,
    cache: &PageCache,
    options: &WatchOptions,
) -> Vec<ChangeEvent> {
    match change.kind {
        ChangeKind::Added if change.path.is_dir() => files_under(&change.path)
            .iter()
            .map(ChangeEvent::added)
            .collect(),
        ChangeKind::Removed => {
            let mut removed: Vec<ChangeEvent> = cache
                .pages()
                .filter(|page| *page != change.path.as_path() && page.starts_with(&change.path))
                .map(ChangeEvent::removed)
                .collect();

            if let (Some(mirror), Some(public)) =
                (options.public_mirror(&change.path), &options.public_dir)
            {
                removed.extend(files_under(&mirror).iter().filter_map(|copy| {
                    let relative = copy.strip_prefix(&options.out_dir).ok()?;
                    Some(ChangeEvent::removed(public.join(relative)))
                }));
            }

            if removed.is_empty() {
                vec![change]
            } else {
                removed
            }
        }
        _ => vec![change],
    }
}

/// Files below `dir`, hidden ones included; nothing when it is not a directory
fn files_under(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(false)
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Watcher state for debouncing
///
/// Pending changes keep the order in which paths were first seen; a later
/// change to the same path replaces the earlier kind in place.
pub(crate) struct WatcherState {
    pub(crate) pending_changes: Vec<ChangeEvent>,
    positions: HashMap<PathBuf, usize>,
    pub(crate) last_change: Option<Instant>,
}

impl WatcherState {
    pub(crate) fn new() -> Self {
        Self {
            pending_changes: Vec::new(),
            positions: HashMap::new(),
            last_change: None,
        }
    }

    pub(crate) fn add_change(&mut self, change: ChangeEvent) {
        self.last_change = Some(Instant::now());

        match self.positions.get(&change.path) {
            Some(&index) => {
                let pending = &mut self.pending_changes[index];
                pending.kind = coalesce(pending.kind, change.kind);
            }
            None => {
                self.positions
                    .insert(change.path.clone(), self.pending_changes.len());
                self.pending_changes.push(change);
            }
        }
    }

    pub(crate) fn should_sync(&self) -> bool {
        if let Some(last) = self.last_change {
            !self.pending_changes.is_empty() && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
        } else {
            false
        }
    }

    pub(crate) fn take_changes(&mut self) -> Vec<ChangeEvent> {
        self.positions.clear();
        self.last_change = None;
        std::mem::take(&mut self.pending_changes)
    }
}

/// Kind recorded for a path that changed twice within one debounce window
fn coalesce(earlier: ChangeKind, later: ChangeKind) -> ChangeKind {
    match (earlier, later) {
        (ChangeKind::Added, ChangeKind::Modified) => ChangeKind::Added,
        (_, later) => later,
    }
}
