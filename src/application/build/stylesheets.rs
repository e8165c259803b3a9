//! Stylesheet pass
//!
//! Post-processes CSS that landed in the destination. Initial builds process
//! every stylesheet there; incremental builds only the copies of changed
//! public stylesheets.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::ports::{BuildEvent, BuildEventSink, FileSystem, StylesheetProcessor};
use crate::domain::value_objects::BuildRequest;
use crate::error::DhowResult;

const STYLESHEET_EXTENSION: &str = "css";

/// Run `processor` over the stylesheets this request affects
pub fn process_stylesheets(
    fs: &dyn FileSystem,
    processor: &dyn StylesheetProcessor,
    public: &Path,
    out: &Path,
    request: &BuildRequest,
    events: &Arc<dyn BuildEventSink>,
) -> DhowResult<Vec<PathBuf>> {
    if !processor.is_enabled() {
        return Ok(Vec::new());
    }

    let targets: Vec<PathBuf> = if request.initial {
        if !fs.exists(out) {
            return Ok(Vec::new());
        }
        fs.list_files(out, Some(STYLESHEET_EXTENSION))?
    } else {
        request
            .changes_under(public)
            .filter(|c| c.kind.is_update() && is_stylesheet(&c.path))
            .filter_map(|c| c.path.strip_prefix(public).ok())
            .map(|relative| out.join(relative))
            .filter(|target| fs.exists(target))
            .collect()
    };

    let mut processed = Vec::with_capacity(targets.len());
    for target in targets {
        if processed.contains(&target) {
            continue;
        }
        tracing::debug!(path = %target.display(), "processing stylesheet");
        processor.process(&target)?;
        events.on_event(BuildEvent::StylesheetProcessed {
            path: target.clone(),
        });
        processed.push(target);
    }
    Ok(processed)
}

fn is_stylesheet(path: &Path) -> bool {
    path.extension()
        .map(|e| e == STYLESHEET_EXTENSION)
        .unwrap_or(false)
}
