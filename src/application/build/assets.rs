//! Public assets
//!
//! Mirrors the public directory into the destination. Initial builds copy the
//! whole tree, hidden files included; incremental builds only touch the
//! files that changed.

use std::path::Path;
use std::sync::Arc;

use crate::domain::ports::{BuildEvent, BuildEventSink, FileSystem};
use crate::domain::value_objects::{BuildRequest, ChangeKind};
use crate::error::DhowResult;

use super::pages::remove_and_prune;
use super::result::AssetSyncReport;

/// Copies static assets verbatim
pub struct PublicAssets<'a> {
    fs: &'a dyn FileSystem,
    events: Arc<dyn BuildEventSink>,
}

impl<'a> PublicAssets<'a> {
    pub fn new(fs: &'a dyn FileSystem, events: Arc<dyn BuildEventSink>) -> Self {
        Self { fs, events }
    }

    /// Sync `public` into `out` for this request. A missing public
    /// directory has nothing to copy.
    pub fn sync(
        &self,
        public: &Path,
        out: &Path,
        request: &BuildRequest,
    ) -> DhowResult<AssetSyncReport> {
        let mut report = AssetSyncReport::default();

        if request.initial {
            if !self.fs.exists(public) {
                tracing::debug!(path = %public.display(), "no public directory");
                return Ok(report);
            }
            for file in self.fs.list_all_files(public)? {
                self.copy(public, &file, out, &mut report)?;
            }
            return Ok(report);
        }

        for change in request.changes_under(public) {
            match change.kind {
                ChangeKind::Added | ChangeKind::Modified => {
                    // Gone again before the build ran
                    if !self.fs.exists(&change.path) {
                        continue;
                    }
                    self.copy(public, &change.path, out, &mut report)?;
                }
                ChangeKind::Removed => {
                    let Ok(relative) = change.path.strip_prefix(public) else {
                        continue;
                    };
                    let target = out.join(relative);
                    remove_and_prune(self.fs, &target, out)?;
                    tracing::debug!(path = %target.display(), "removed public asset");
                    report.removed.push(target);
                }
            }
        }
        Ok(report)
    }

    fn copy(
        &self,
        public: &Path,
        file: &Path,
        out: &Path,
        report: &mut AssetSyncReport,
    ) -> DhowResult<()> {
        let Ok(relative) = file.strip_prefix(public) else {
            return Ok(());
        };
        let target = out.join(relative);
        self.fs.copy(file, &target)?;

        if self.events.wants_detailed_events() {
            self.events.on_event(BuildEvent::AssetCopied {
                path: target.clone(),
            });
        }
        report.copied.push(target);
        Ok(())
    }
}
