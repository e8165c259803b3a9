//! Invalidation engine
//!
//! Turns the raw change list of a build request into the work of that build:
//! which outputs to delete and which pages to re-render. Runs three passes in
//! a fixed order. Deletions are resolved first, against the cache as it was
//! before this build touches it.
//!
//! 1. Deletion: outputs recorded for every removed page.
//! 2. Propagation: pages importing a changed file get a synthesized
//!    `Modified` change.
//! 3. Selection: the pages to rebuild.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::domain::entities::PageCache;
use crate::domain::value_objects::{
    is_module_file, is_shell_module, BuildRequest, ChangeEvent, ChangeKind, Propagation,
};

/// Outcome of the invalidation passes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidationPlan {
    /// Incoming changes followed by synthesized ones
    pub changes: Vec<ChangeEvent>,
    /// How many of `changes` came from the request
    pub incoming_count: usize,
    /// Output files to delete
    pub deletions: Vec<PathBuf>,
    /// Removed pages whose cache entries must be dropped
    pub removed_sources: Vec<PathBuf>,
    /// Removed pages with no recorded outputs
    pub cache_misses: Vec<PathBuf>,
    /// Pages to transpile and render, in order
    pub rebuild: Vec<PathBuf>,
    /// `_document.js` or `_app.js` changed, so every page was selected
    pub shell_changed: bool,
}

impl InvalidationPlan {
    /// Changes added by propagation
    pub fn synthesized(&self) -> &[ChangeEvent] {
        &self.changes[self.incoming_count.min(self.changes.len())..]
    }

    /// Nothing to delete and nothing to render
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.rebuild.is_empty()
    }
}

/// Computes an [`InvalidationPlan`] for the page tree rooted at `pages_root`
#[derive(Debug, Clone)]
pub struct Invalidator {
    pages_root: PathBuf,
    propagation: Propagation,
}

impl Invalidator {
    pub fn new(pages_root: impl Into<PathBuf>, propagation: Propagation) -> Self {
        Self {
            pages_root: pages_root.into(),
            propagation,
        }
    }

    pub fn pages_root(&self) -> &Path {
        &self.pages_root
    }

    /// Plan a build.
    ///
    /// `source_pages` is only consulted for initial builds, where every page
    /// in the tree is rebuilt.
    pub fn plan(
        &self,
        request: &BuildRequest,
        cache: &PageCache,
        source_pages: &[PathBuf],
    ) -> InvalidationPlan {
        let mut plan = InvalidationPlan::default();
        let final_kinds = final_kinds(&request.changes);

        self.deletion_pass(request, cache, &mut plan);
        plan.incoming_count = request.changes.len();
        plan.changes = self.propagation_pass(request, cache, &final_kinds);
        self.selection_pass(request, cache, source_pages, &final_kinds, &mut plan);

        plan
    }

    fn deletion_pass(&self, request: &BuildRequest, cache: &PageCache, plan: &mut InvalidationPlan) {
        for change in request.changes_under(&self.pages_root) {
            if change.kind != ChangeKind::Removed || is_shell_module(&self.pages_root, &change.path)
            {
                continue;
            }
            if !plan.removed_sources.contains(&change.path) {
                plan.removed_sources.push(change.path.clone());
            }

            match cache.get(&change.path) {
                Some(entry) if !entry.routes().is_empty() => {
                    for route in entry.routes() {
                        if !plan.deletions.contains(route) {
                            plan.deletions.push(route.clone());
                        }
                    }
                }
                _ => {
                    if !plan.cache_misses.contains(&change.path) {
                        plan.cache_misses.push(change.path.clone());
                    }
                }
            }
        }
    }

    fn propagation_pass(
        &self,
        request: &BuildRequest,
        cache: &PageCache,
        final_kinds: &HashMap<&Path, ChangeKind>,
    ) -> Vec<ChangeEvent> {
        let mut changes = request.changes.clone();
        let mut pending: HashSet<PathBuf> = changes
            .iter()
            .filter(|c| c.kind.is_update())
            .map(|c| c.path.clone())
            .collect();

        let incoming = changes.len();
        let mut cursor = 0;
        loop {
            let limit = match self.propagation {
                Propagation::Shallow => incoming,
                Propagation::Transitive => changes.len(),
            };
            if cursor >= limit {
                break;
            }

            let change = changes[cursor].clone();
            cursor += 1;
            if !change.kind.is_update() {
                continue;
            }

            for dependent in cache.dependents_of(&change.path) {
                let removed = final_kinds.get(dependent.as_path()) == Some(&ChangeKind::Removed);
                if removed || pending.contains(&dependent) {
                    continue;
                }
                tracing::debug!(
                    page = %dependent.display(),
                    dependency = %change.path.display(),
                    "dependency changed, scheduling page"
                );
                pending.insert(dependent.clone());
                changes.push(ChangeEvent::modified(dependent));
            }
        }

        changes
    }

    fn selection_pass(
        &self,
        request: &BuildRequest,
        cache: &PageCache,
        source_pages: &[PathBuf],
        final_kinds: &HashMap<&Path, ChangeKind>,
        plan: &mut InvalidationPlan,
    ) {
        if request.initial {
            plan.rebuild = source_pages
                .iter()
                .filter(|p| !is_shell_module(&self.pages_root, p))
                .cloned()
                .collect();
            return;
        }

        let mut seen: HashSet<PathBuf> = HashSet::new();
        for change in &plan.changes {
            if !change.kind.is_update() || !self.is_page(&change.path) {
                continue;
            }
            if final_kinds.get(change.path.as_path()) == Some(&ChangeKind::Removed) {
                continue;
            }
            if seen.insert(change.path.clone()) {
                plan.rebuild.push(change.path.clone());
            }
        }

        plan.shell_changed = plan
            .changes
            .iter()
            .any(|c| is_shell_module(&self.pages_root, &c.path));
        if plan.shell_changed {
            for page in cache.pages() {
                if plan.removed_sources.iter().any(|r| r == page) || !self.is_page(page) {
                    continue;
                }
                if seen.insert(page.to_path_buf()) {
                    plan.rebuild.push(page.to_path_buf());
                }
            }
        }
    }

    /// A page module under the pages root that is not a shell module
    fn is_page(&self, path: &Path) -> bool {
        path.starts_with(&self.pages_root)
            && is_module_file(path)
            && !is_shell_module(&self.pages_root, path)
    }
}

/// Last change kind seen for every path in the request
fn final_kinds(changes: &[ChangeEvent]) -> HashMap<&Path, ChangeKind> {
    changes
        .iter()
        .map(|c| (c.path.as_path(), c.kind))
        .collect()
}
