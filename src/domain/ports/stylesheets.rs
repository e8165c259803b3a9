//! StylesheetProcessor port - post-processes CSS in the destination tree

use std::path::Path;

use crate::error::DhowResult;

/// Rewrites a stylesheet in place
pub trait StylesheetProcessor {
    /// Whether processing is configured at all (otherwise the pass is skipped)
    fn is_enabled(&self) -> bool;

    /// Process `file` in place
    fn process(&self, file: &Path) -> DhowResult<()>;
}

/// Leaves stylesheets untouched
pub struct NoopStylesheets;

impl StylesheetProcessor for NoopStylesheets {
    fn is_enabled(&self) -> bool {
        false
    }

    fn process(&self, _file: &Path) -> DhowResult<()> {
        Ok(())
    }
}
