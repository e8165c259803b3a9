//! Build Results
//!
//! Result types for site builds.

use std::path::PathBuf;

/// What one page build did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageBuildReport {
    /// Whether this was an initial (full) build
    pub initial: bool,
    /// Source pages that were rendered
    pub rebuilt: Vec<PathBuf>,
    /// Output files written
    pub written: Vec<PathBuf>,
    /// Output files deleted (removed pages and shrunken route lists)
    pub deleted: Vec<PathBuf>,
    /// Removed pages that had no recorded outputs
    pub cache_misses: Vec<PathBuf>,
    /// Nothing needed rendering, staging was never set up
    pub skipped: bool,
}

impl PageBuildReport {
    pub fn new(initial: bool) -> Self {
        Self {
            initial,
            ..Self::default()
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.written.is_empty() || !self.deleted.is_empty()
    }
}

/// What the public asset sync did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSyncReport {
    /// Destination files copied from the public tree
    pub copied: Vec<PathBuf>,
    /// Destination copies of removed public files
    pub removed: Vec<PathBuf>,
}

/// Result of a site build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteBuildReport {
    pub pages: PageBuildReport,
    pub assets: AssetSyncReport,
    /// Stylesheets post-processed in place
    pub stylesheets: Vec<PathBuf>,
}

impl SiteBuildReport {
    pub fn has_changes(&self) -> bool {
        self.pages.has_changes()
            || !self.assets.copied.is_empty()
            || !self.assets.removed.is_empty()
            || !self.stylesheets.is_empty()
    }
}
