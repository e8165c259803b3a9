//! Build Options
//!
//! Configuration types for site builds.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::Propagation;

/// Directory under the destination holding transpiled modules during a build
pub const STAGING_DIR: &str = ".staging";

/// Options for the page builder
#[derive(Debug, Clone)]
pub struct PageBuildOptions {
    /// Root of the page sources
    pub pages_root: PathBuf,
    /// Destination root
    pub out_dir: PathBuf,
    /// How far dependency changes propagate
    pub propagation: Propagation,
}

impl PageBuildOptions {
    pub fn new(pages_root: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            pages_root: pages_root.into(),
            out_dir: out_dir.into(),
            propagation: Propagation::default(),
        }
    }

    pub fn with_propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = propagation;
        self
    }

    /// `<out>/.staging`
    pub fn staging_dir(&self) -> PathBuf {
        self.out_dir.join(STAGING_DIR)
    }
}

/// Options for the site build use case
#[derive(Debug, Clone)]
pub struct SiteBuildOptions {
    /// Page builder options (pages root, destination, propagation)
    pub pages: PageBuildOptions,
    /// Static assets copied verbatim into the destination
    pub public_dir: PathBuf,
    /// Wipe the destination before initial builds
    pub clean: bool,
}

impl SiteBuildOptions {
    pub fn new(pages_root: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        let pages = PageBuildOptions::new(pages_root, out_dir);
        let public_dir = pages
            .pages_root
            .parent()
            .map(|p| p.join("public"))
            .unwrap_or_else(|| PathBuf::from("public"));
        Self {
            pages,
            public_dir,
            clean: true,
        }
    }

    pub fn with_public_dir(mut self, public_dir: impl Into<PathBuf>) -> Self {
        self.public_dir = public_dir.into();
        self
    }

    pub fn with_propagation(mut self, propagation: Propagation) -> Self {
        self.pages.propagation = propagation;
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn pages_root(&self) -> &Path {
        &self.pages.pages_root
    }

    pub fn out_dir(&self) -> &Path {
        &self.pages.out_dir
    }
}
