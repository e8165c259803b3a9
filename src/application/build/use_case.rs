//! Site Build Use Case
//!
//! Orchestrates one logical build of the whole site:
//! 1. Validate the directory layout
//! 2. Clean the destination (initial builds only)
//! 3. Build pages
//! 4. Sync public assets
//! 5. Post-process stylesheets

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::PageCache;
use crate::domain::ports::{
    BuildEvent, BuildEventSink, FileSystem, NoopEventSink, PageRuntime, StylesheetProcessor,
    Transpiler,
};
use crate::domain::value_objects::{normalize_lexically, BuildRequest};
use crate::error::{DhowError, DhowResult};

use super::assets::PublicAssets;
use super::options::SiteBuildOptions;
use super::pages::PageBuilder;
use super::result::SiteBuildReport;
use super::stylesheets::process_stylesheets;

/// Site build use case
///
/// Parameterized by its collaborators (ports) so builds run the same way
/// against real tools and in-process fakes.
pub struct SiteBuildUseCase<FS, T, R, S>
where
    FS: FileSystem,
    T: Transpiler,
    R: PageRuntime,
    S: StylesheetProcessor,
{
    file_system: FS,
    transpiler: T,
    runtime: R,
    stylesheets: S,
    options: SiteBuildOptions,
}

impl<FS, T, R, S> SiteBuildUseCase<FS, T, R, S>
where
    FS: FileSystem,
    T: Transpiler,
    R: PageRuntime,
    S: StylesheetProcessor,
{
    pub fn new(
        file_system: FS,
        transpiler: T,
        runtime: R,
        stylesheets: S,
        options: SiteBuildOptions,
    ) -> Self {
        Self {
            file_system,
            transpiler,
            runtime,
            stylesheets,
            options,
        }
    }

    pub fn options(&self) -> &SiteBuildOptions {
        &self.options
    }

    /// Execute one build
    pub fn execute(
        &self,
        request: &BuildRequest,
        cache: &mut PageCache,
    ) -> DhowResult<SiteBuildReport> {
        self.execute_with_events(request, cache, Arc::new(NoopEventSink))
    }

    /// Execute one build with event reporting
    pub fn execute_with_events(
        &self,
        request: &BuildRequest,
        cache: &mut PageCache,
        events: Arc<dyn BuildEventSink>,
    ) -> DhowResult<SiteBuildReport> {
        check_layout(self.options.pages_root(), self.options.out_dir())?;

        events.on_event(BuildEvent::Started {
            initial: request.initial,
            change_count: request.changes.len(),
        });

        if request.initial && self.options.clean {
            self.clean_destination()?;
        }

        let pages = PageBuilder::new(
            &self.file_system,
            &self.transpiler,
            &self.runtime,
            &self.options.pages,
            events.clone(),
        )
        .build(request, cache)?;

        let assets = PublicAssets::new(&self.file_system, events.clone()).sync(
            &self.options.public_dir,
            self.options.out_dir(),
            request,
        )?;

        let stylesheets = process_stylesheets(
            &self.file_system,
            &self.stylesheets,
            &self.options.public_dir,
            self.options.out_dir(),
            request,
            &events,
        )?;

        events.on_event(BuildEvent::Completed {
            page_count: pages.rebuilt.len(),
            written_count: pages.written.len(),
            deleted_count: pages.deleted.len(),
        });
        tracing::info!(
            pages = pages.rebuilt.len(),
            written = pages.written.len(),
            deleted = pages.deleted.len(),
            assets = assets.copied.len(),
            "build finished"
        );

        Ok(SiteBuildReport {
            pages,
            assets,
            stylesheets,
        })
    }

    fn clean_destination(&self) -> DhowResult<()> {
        let out = self.options.out_dir();
        match self.file_system.remove_dir_all(out) {
            Ok(()) => {
                tracing::debug!(path = %out.display(), "cleaned destination");
                Ok(())
            }
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Pages and destination must be disjoint trees
fn check_layout(pages: &Path, out: &Path) -> DhowResult<()> {
    let pages = normalize_lexically(pages);
    let out = normalize_lexically(out);
    if out.starts_with(&pages) || pages.starts_with(&out) {
        return Err(DhowError::OverlappingDirectories { pages, out });
    }
    Ok(())
}
