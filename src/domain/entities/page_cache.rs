//! Page cache entity - tracks what every source page produced
//!
//! For each source page the cache remembers the output files it wrote during
//! its most recent render and the local files it imports. The cache lives for
//! one build session (a `build` invocation or a `watch` session) and is passed
//! explicitly into every build; it is never written to disk.
//!
//! Invariant maintained by the page builder: after a successful build, the
//! route list of every still-existing source equals the set of output files
//! on disk generated from it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Cached state of one source page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntry {
    /// Absolute output files, in render order
    routes: Vec<PathBuf>,
    /// Absolute paths of local imports
    dependencies: Vec<PathBuf>,
}

impl CacheEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &[PathBuf] {
        &self.routes
    }

    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }

    /// Whether `path` is one of this page's local imports
    pub fn depends_on(&self, path: &Path) -> bool {
        self.dependencies.iter().any(|d| d == path)
    }
}

/// Source page path -> cache entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageCache {
    entries: BTreeMap<PathBuf, CacheEntry>,
}

impl PageCache {
    /// Create an empty cache (start of a session)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&CacheEntry> {
        self.entries.get(path)
    }

    /// Existing entry, or a new empty one stored under `path`
    pub fn ensure(&mut self, path: &Path) -> &mut CacheEntry {
        self.entries.entry(path.to_path_buf()).or_default()
    }

    /// Replace the dependency list (never merged with the previous one)
    pub fn set_dependencies(&mut self, path: &Path, dependencies: Vec<PathBuf>) {
        self.ensure(path).dependencies = dependencies;
    }

    /// Record an output file; recording the same file twice is a no-op
    pub fn append_route(&mut self, path: &Path, output: PathBuf) {
        let entry = self.ensure(path);
        if !entry.routes.contains(&output) {
            entry.routes.push(output);
        }
    }

    /// Forget the outputs of `path` before it is re-rendered
    pub fn clear_routes(&mut self, path: &Path) {
        if let Some(entry) = self.entries.get_mut(path) {
            entry.routes.clear();
        }
    }

    /// Drop the entry of a deleted source
    pub fn remove(&mut self, path: &Path) -> Option<CacheEntry> {
        self.entries.remove(path)
    }

    /// Pages whose dependency list contains `path`, in key order
    pub fn dependents_of(&self, path: &Path) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.depends_on(path))
            .map(|(page, _)| page.clone())
            .collect()
    }

    /// Every cached source page, in key order
    pub fn pages(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &CacheEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_path(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything (initial build wipes the destination)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
