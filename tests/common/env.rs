//! Site environment for scenario tests.
//!
//! Provides `SiteEnv` - a project in a temp directory (`pages/`, `public/`,
//! `out/`) wired to the real local filesystem and the fakes, plus the page
//! cache a watch session would carry between builds.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use dhow::domain::ports::{BuildEvent, BuildEventSink, NoopStylesheets};
use dhow::infrastructure::LocalFs;
use dhow::{
    BuildRequest, ChangeEvent, DhowResult, PageCache, Propagation, SiteBuildOptions,
    SiteBuildReport, SiteBuildUseCase,
};

use super::fakes::{FakeRuntime, FakeTranspiler, TranspileLog};

/// Collects every build event
#[derive(Default)]
pub struct EventLog(Mutex<Vec<BuildEvent>>);

impl EventLog {
    pub fn events(&self) -> Vec<BuildEvent> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

impl BuildEventSink for EventLog {
    fn on_event(&self, event: BuildEvent) {
        self.0.lock().unwrap().push(event);
    }
}

/// A site under construction
pub struct SiteEnv {
    pub dir: TempDir,
    pub cache: PageCache,
    pub events: Arc<EventLog>,
    pub transpiled: TranspileLog,
    use_case: SiteBuildUseCase<LocalFs, FakeTranspiler, FakeRuntime, NoopStylesheets>,
}

impl SiteEnv {
    pub fn new() -> Self {
        Self::with_propagation(Propagation::Shallow)
    }

    pub fn with_propagation(propagation: Propagation) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        std::fs::create_dir_all(root.join("pages")).unwrap();

        let options = SiteBuildOptions::new(root.join("pages"), root.join("out"))
            .with_propagation(propagation);
        let (transpiler, transpiled) = FakeTranspiler::new();
        let use_case = SiteBuildUseCase::new(
            LocalFs::new(),
            transpiler,
            FakeRuntime,
            NoopStylesheets,
            options,
        );

        Self {
            dir,
            cache: PageCache::new(),
            events: Arc::new(EventLog::default()),
            transpiled,
            use_case,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a page source, relative to `pages/`
    pub fn page_path(&self, relative: &str) -> PathBuf {
        self.root().join("pages").join(relative)
    }

    /// Path of a public asset, relative to `public/`
    pub fn public_path(&self, relative: &str) -> PathBuf {
        self.root().join("public").join(relative)
    }

    /// Path under the destination
    pub fn out_path(&self, relative: &str) -> PathBuf {
        self.root().join("out").join(relative)
    }

    /// Write a page source and return its path
    pub fn write_page(&self, relative: &str, content: &str) -> PathBuf {
        write(self.page_path(relative), content)
    }

    /// Write a public asset and return its path
    pub fn write_public(&self, relative: &str, content: &str) -> PathBuf {
        write(self.public_path(relative), content)
    }

    pub fn remove(&self, path: &Path) {
        std::fs::remove_file(path).unwrap();
    }

    pub fn read_out(&self, relative: &str) -> String {
        let path = self.out_path(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
    }

    /// Every file under the destination, relative and `/`-separated, sorted
    pub fn output_files(&self) -> Vec<String> {
        let out = self.root().join("out");
        let mut files: Vec<String> = super::list_all_files(&out)
            .into_iter()
            .map(|f| {
                Path::new(&f)
                    .strip_prefix(&out)
                    .unwrap()
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect();
        files.sort();
        files
    }

    pub fn build_initial(&mut self) -> DhowResult<SiteBuildReport> {
        self.run(&BuildRequest::initial())
    }

    pub fn build(&mut self, changes: Vec<ChangeEvent>) -> DhowResult<SiteBuildReport> {
        self.run(&BuildRequest::incremental(changes))
    }

    fn run(&mut self, request: &BuildRequest) -> DhowResult<SiteBuildReport> {
        self.events.clear();
        self.transpiled.lock().unwrap().clear();
        self.use_case
            .execute_with_events(request, &mut self.cache, self.events.clone())
    }

    /// Names of the files the last build transpiled
    pub fn transpiled(&self) -> Vec<String> {
        self.transpiled.lock().unwrap().clone()
    }
}

fn write(path: PathBuf, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
