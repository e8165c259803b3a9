//! Page Builder
//!
//! Runs one page build against the session cache:
//! 1. Invalidate: delete outputs of removed pages, propagate dependency changes
//! 2. Refresh the dependency lists of the pages being rebuilt
//! 3. Transpile those pages and the shell modules into staging
//! 4. Resolve the document shell and the page wrapper
//! 5. Render every route of every page and record the outputs
//! 6. Remove staging

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::{Component, DocumentShell, Node, PageCache, PageModule};
use crate::domain::ports::{
    BuildEvent, BuildEventSink, FileSystem, FsResult, PageRuntime, TranspileJob, Transpiler,
};
use crate::domain::services::{
    extract_local_dependencies, resolve_routes, InvalidationPlan, Invalidator,
};
use crate::domain::value_objects::{BuildRequest, Route, MODULE_EXTENSION};
use crate::error::{DhowError, DhowResult};

use super::options::PageBuildOptions;
use super::result::PageBuildReport;

const DOCUMENT_MODULE: &str = "_document.js";
const APP_MODULE: &str = "_app.js";

/// Builds pages into the destination tree
pub struct PageBuilder<'a> {
    fs: &'a dyn FileSystem,
    transpiler: &'a dyn Transpiler,
    runtime: &'a dyn PageRuntime,
    options: &'a PageBuildOptions,
    events: Arc<dyn BuildEventSink>,
}

impl<'a> PageBuilder<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        transpiler: &'a dyn Transpiler,
        runtime: &'a dyn PageRuntime,
        options: &'a PageBuildOptions,
        events: Arc<dyn BuildEventSink>,
    ) -> Self {
        Self {
            fs,
            transpiler,
            runtime,
            options,
            events,
        }
    }

    /// Build the pages affected by `request`, updating `cache` in place.
    ///
    /// On error, outputs already written stay on disk. The cache still lists
    /// every output of a failed page, old and new, so none is lost track of.
    pub fn build(
        &self,
        request: &BuildRequest,
        cache: &mut PageCache,
    ) -> DhowResult<PageBuildReport> {
        let mut report = PageBuildReport::new(request.initial);
        let pages_root = &self.options.pages_root;

        if request.initial {
            cache.clear();
        }
        let sources = if request.initial {
            self.source_pages()?
        } else {
            Vec::new()
        };

        let plan = Invalidator::new(pages_root, self.options.propagation)
            .plan(request, cache, &sources);
        tracing::debug!(
            deletions = plan.deletions.len(),
            rebuild = plan.rebuild.len(),
            synthesized = plan.synthesized().len(),
            shell_changed = plan.shell_changed,
            "invalidation planned"
        );

        self.apply_deletions(&plan, cache, &mut report)?;

        if plan.rebuild.is_empty() && !request.initial {
            tracing::debug!("no pages to build, skipping");
            self.events.on_event(BuildEvent::PagesSkipped);
            report.skipped = true;
            return Ok(report);
        }

        for page in &plan.rebuild {
            let content = self.fs.read(page)?;
            cache.set_dependencies(page, extract_local_dependencies(page, &content));
        }

        let staging = self.options.staging_dir();
        let result = self.build_in_staging(&staging, &plan.rebuild, cache, &mut report);
        if let Err(err) = self.fs.remove_dir_all(&staging) {
            if !err.is_not_found() {
                tracing::warn!(path = %staging.display(), "failed to remove staging: {}", err);
            }
        }
        result?;

        Ok(report)
    }

    /// Every page module under the pages root; a missing root has no pages
    fn source_pages(&self) -> DhowResult<Vec<PathBuf>> {
        match self
            .fs
            .list_files(&self.options.pages_root, Some(MODULE_EXTENSION))
        {
            Ok(files) => Ok(files),
            Err(err) if err.is_not_found() => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn apply_deletions(
        &self,
        plan: &InvalidationPlan,
        cache: &mut PageCache,
        report: &mut PageBuildReport,
    ) -> DhowResult<()> {
        for output in &plan.deletions {
            self.delete_output(output, report)?;
        }
        for source in &plan.removed_sources {
            cache.remove(source);
        }
        for miss in &plan.cache_misses {
            tracing::warn!(
                path = %miss.display(),
                "page cache did not contain expected path"
            );
            self.events
                .on_event(BuildEvent::CacheMiss { path: miss.clone() });
            report.cache_misses.push(miss.clone());
        }
        Ok(())
    }

    fn build_in_staging(
        &self,
        staging: &Path,
        rebuild: &[PathBuf],
        cache: &mut PageCache,
        report: &mut PageBuildReport,
    ) -> DhowResult<()> {
        self.fs.create_dir_all(staging)?;
        self.runtime.prepare(staging)?;
        self.transpiler.prepare(staging)?;

        let pages_root = &self.options.pages_root;
        let shell_sources: Vec<PathBuf> = [DOCUMENT_MODULE, APP_MODULE]
            .iter()
            .map(|name| pages_root.join(name))
            .filter(|path| self.fs.exists(path))
            .collect();

        let jobs: Vec<TranspileJob> = rebuild
            .iter()
            .chain(shell_sources.iter())
            .map(|source| TranspileJob::mirrored(source, pages_root, staging))
            .collect();
        tracing::debug!(count = jobs.len(), staging = %staging.display(), "transpiling");
        self.transpiler.transpile(&jobs)?;
        self.events
            .on_event(BuildEvent::Transpiled { count: jobs.len() });

        let shell = self.resolve_shell(staging)?;
        let wrapper = self.resolve_wrapper(staging)?;

        for page in rebuild {
            self.render_page(page, staging, &shell, wrapper.as_ref(), cache, report)?;
        }
        Ok(())
    }

    /// `_document.js` when present, otherwise the built-in shell
    fn resolve_shell(&self, staging: &Path) -> DhowResult<DocumentShell> {
        let source = self.options.pages_root.join(DOCUMENT_MODULE);
        if !self.fs.exists(&source) {
            return Ok(DocumentShell::builtin());
        }

        let component = Component::load(self.runtime, &staging.join(DOCUMENT_MODULE), &source)?;
        match self.runtime.document(component.staged())? {
            Node::Element(root) => DocumentShell::new(root),
            _ => Err(DhowError::MalformedComponent {
                file: source,
                reason: "default export did not return an element".to_string(),
            }),
        }
    }

    /// `_app.js` when present; pages render directly otherwise
    fn resolve_wrapper(&self, staging: &Path) -> DhowResult<Option<Component>> {
        let source = self.options.pages_root.join(APP_MODULE);
        if !self.fs.exists(&source) {
            return Ok(None);
        }
        Component::load(self.runtime, &staging.join(APP_MODULE), &source).map(Some)
    }

    fn render_page(
        &self,
        page: &Path,
        staging: &Path,
        shell: &DocumentShell,
        wrapper: Option<&Component>,
        cache: &mut PageCache,
        report: &mut PageBuildReport,
    ) -> DhowResult<()> {
        let pages_root = &self.options.pages_root;
        let staged = TranspileJob::mirrored(page, pages_root, staging).output;
        let module = PageModule::load(self.runtime, &staged, page)?;

        let relative = page.strip_prefix(pages_root).unwrap_or(page);
        let logical_dir = logical_dir(relative);
        let base_name = page
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let routes = resolve_routes(&logical_dir, base_name, module.paths()?);
        tracing::debug!(page = %page.display(), routes = routes.len(), "rendering page");

        let previous: Vec<PathBuf> = cache
            .get(page)
            .map(|entry| entry.routes().to_vec())
            .unwrap_or_default();

        let mut written = Vec::new();
        let rendered = self.write_routes(page, &module, &routes, shell, wrapper, &mut written);

        // A failed page keeps every output that may still be on disk, so a
        // later removal can find them all
        cache.clear_routes(page);
        if let Err(err) = rendered {
            for output in previous.into_iter().chain(written) {
                cache.append_route(page, output);
            }
            return Err(err);
        }
        for output in &written {
            cache.append_route(page, output.clone());
        }

        for stale in previous.iter().filter(|p| !written.contains(p)) {
            self.delete_output(stale, report)?;
        }
        report.written.extend(written);

        self.events.on_event(BuildEvent::PageBuilt {
            source: page.to_path_buf(),
            route_count: routes.len(),
        });
        report.rebuilt.push(page.to_path_buf());
        Ok(())
    }

    /// Render and write every route of one page, pushing each output as it lands
    fn write_routes(
        &self,
        page: &Path,
        module: &PageModule<'_>,
        routes: &[Route],
        shell: &DocumentShell,
        wrapper: Option<&Component>,
        written: &mut Vec<PathBuf>,
    ) -> DhowResult<()> {
        for route in routes {
            let props = module.props(route.suffix())?;
            let rendered = module.render(wrapper, &props)?;
            let html = shell.compose(&rendered.html, &rendered.head)?;

            let output = route.output_file(&self.options.out_dir);
            self.fs.write(&output, &html)?;

            if self.events.wants_detailed_events() {
                self.events.on_event(BuildEvent::RouteWritten {
                    source: page.to_path_buf(),
                    path: output.clone(),
                });
            }
            written.push(output);
        }
        Ok(())
    }

    fn delete_output(&self, output: &Path, report: &mut PageBuildReport) -> DhowResult<()> {
        remove_and_prune(self.fs, output, &self.options.out_dir)?;
        tracing::debug!(path = %output.display(), "removed output");
        if self.events.wants_detailed_events() {
            self.events.on_event(BuildEvent::OutputDeleted {
                path: output.to_path_buf(),
            });
        }
        report.deleted.push(output.to_path_buf());
        Ok(())
    }
}

/// `/`-separated directory of a page relative to the pages root
fn logical_dir(relative: &Path) -> String {
    relative
        .parent()
        .map(|dir| {
            dir.components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

/// Remove `file` (already gone is fine), then every directory above it that
/// became empty, stopping below `root`.
pub(super) fn remove_and_prune(fs: &dyn FileSystem, file: &Path, root: &Path) -> FsResult<()> {
    match fs.remove(file) {
        Ok(()) => {}
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(err),
    }

    let mut dir = file.parent();
    while let Some(current) = dir {
        if current == root || !current.starts_with(root) {
            break;
        }
        if !fs.remove_empty_dir(current)? {
            break;
        }
        dir = current.parent();
    }
    Ok(())
}
