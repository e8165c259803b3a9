use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use dhow::watcher::{watch, WatchEvent, WatchOptions};

use super::{GlobalArgs, Site};
use crate::cli::SiteArgs;

pub fn cmd_watch(global: &GlobalArgs, args: &SiteArgs) -> Result<()> {
    let site = Site::load(global, args)?;
    let use_case = site.use_case();
    let events = site.event_sink(global, "watch");
    let options = WatchOptions::new(&site.project_root, site.options.out_dir())
        .with_public_dir(&site.options.public_dir);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install the Ctrl+C handler")?;

    let json = global.json;
    watch(&use_case, &options, running, events, |event| {
        if json {
            println!("{}", event.to_json());
            return;
        }
        match &event {
            WatchEvent::WatchStarted { root } => {
                println!("Watching {} (Ctrl+C to stop)", root);
            }
            WatchEvent::FileChanged { path, kind } => {
                let path = std::path::Path::new(path);
                let shown = path.strip_prefix(&site.project_root).unwrap_or(path);
                println!("[{}] {} {}", clock(), kind, shown.display());
            }
            WatchEvent::Error { message } => eprintln!("[{}] error: {}", clock(), message),
            WatchEvent::Shutdown => println!("Stopped"),
            // The build event sink reports build progress
            WatchEvent::BuildStarted { .. } | WatchEvent::BuildComplete { .. } => {}
        }
    })?;

    Ok(())
}

/// Wall-clock time of day (UTC) as HH:MM:SS
fn clock() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}
