use anyhow::{Context, Result};

use dhow::{BuildRequest, PageCache};

use super::{GlobalArgs, Site};
use crate::cli::SiteArgs;

pub fn cmd_build(global: &GlobalArgs, args: &SiteArgs) -> Result<()> {
    let site = Site::load(global, args)?;
    let use_case = site.use_case();
    let events = site.event_sink(global, "build");

    let mut cache = PageCache::new();
    let report = use_case
        .execute_with_events(&BuildRequest::initial(), &mut cache, events)
        .context("build failed")?;

    tracing::debug!(
        pages = report.pages.rebuilt.len(),
        assets = report.assets.copied.len(),
        stylesheets = report.stylesheets.len(),
        "build finished"
    );
    Ok(())
}
