//! Watch and rebuild loop

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::SiteBuildUseCase;
use crate::domain::entities::PageCache;
use crate::domain::ports::{BuildEventSink, FileSystem, PageRuntime, StylesheetProcessor, Transpiler};
use crate::domain::value_objects::{BuildRequest, ChangeEvent, ChangeKind, ContentHash};
use crate::error::{DhowError, DhowResult};

use super::event::{classify, expand_directory, WatchEvent, WatchOptions, WatcherState};

/// Build the site, then rebuild incrementally on every debounced batch of
/// changes until `running` is cleared
///
/// Build failures are reported through `event_callback` and the session
/// keeps going. Only a directory layout error, which no edit under the
/// watched tree can fix, ends the session early.
pub fn watch<FS, T, R, S>(
    use_case: &SiteBuildUseCase<FS, T, R, S>,
    options: &WatchOptions,
    running: Arc<AtomicBool>,
    build_events: Arc<dyn BuildEventSink>,
    event_callback: impl Fn(WatchEvent),
) -> DhowResult<()>
where
    FS: FileSystem,
    T: Transpiler,
    R: PageRuntime,
    S: StylesheetProcessor,
{
    event_callback(WatchEvent::WatchStarted {
        root: options.project_root.display().to_string(),
    });

    // One cache per session, threaded through every build
    let mut cache = PageCache::new();
    let mut session = Session {
        use_case,
        cache: &mut cache,
        build_events,
        needs_full_build: true,
    };
    session.build(Vec::new(), &event_callback)?;

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                let _ = tx.send(event);
            }
            Err(err) => tracing::warn!(error = %err, "file watcher reported an error"),
        },
        Config::default(),
    )?;

    watcher.watch(&options.project_root, RecursiveMode::Recursive)?;
    tracing::info!(root = %options.project_root.display(), "watching for changes");

    let mut state = WatcherState::new();
    let mut content_hashes: HashMap<PathBuf, ContentHash> = HashMap::new();

    // notify may replay events for files that existed when the watch was registered
    let cooldown_end = Instant::now() + Duration::from_millis(500);
    while Instant::now() < cooldown_end {
        let _ = rx.recv_timeout(Duration::from_millis(50));
    }

    while running.load(Ordering::SeqCst) {
        if let Ok(event) = rx.recv_timeout(Duration::from_millis(50)) {
            for change in classify(&event.kind, &event.paths) {
                if options.is_ignored(&change.path) {
                    continue;
                }
                for change in expand_directory(change, &*session.cache, options) {
                    if options.is_ignored(&change.path) {
                        continue;
                    }
                    if let Some(change) = filter_unchanged(change, &mut content_hashes) {
                        state.add_change(change);
                    }
                }
            }
        }

        if state.should_sync() {
            let changes = state.take_changes();
            for change in &changes {
                event_callback(WatchEvent::FileChanged {
                    path: change.path.display().to_string(),
                    kind: change.kind,
                });
            }
            session.build(changes, &event_callback)?;
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}

/// Drop modifications that leave a file's bytes as they were last seen, and
/// anything that turns out to be a directory
fn filter_unchanged(
    change: ChangeEvent,
    content_hashes: &mut HashMap<PathBuf, ContentHash>,
) -> Option<ChangeEvent> {
    if change.kind == ChangeKind::Removed {
        content_hashes.remove(&change.path);
        return Some(change);
    }

    if change.path.is_dir() {
        return None;
    }

    // Unreadable here usually means it is already gone; its removal follows
    let content = std::fs::read(&change.path).ok()?;
    let hash = ContentHash::from_bytes(&content);

    if change.kind == ChangeKind::Modified && content_hashes.get(&change.path) == Some(&hash) {
        tracing::trace!(path = %change.path.display(), "content unchanged, skipping");
        return None;
    }

    content_hashes.insert(change.path.clone(), hash);
    Some(change)
}

struct Session<'a, FS, T, R, S>
where
    FS: FileSystem,
    T: Transpiler,
    R: PageRuntime,
    S: StylesheetProcessor,
{
    use_case: &'a SiteBuildUseCase<FS, T, R, S>,
    cache: &'a mut PageCache,
    build_events: Arc<dyn BuildEventSink>,
    /// Set until a full build succeeds, so a broken first build is retried in full
    needs_full_build: bool,
}

impl<FS, T, R, S> Session<'_, FS, T, R, S>
where
    FS: FileSystem,
    T: Transpiler,
    R: PageRuntime,
    S: StylesheetProcessor,
{
    fn build(&mut self, changes: Vec<ChangeEvent>, callback: &impl Fn(WatchEvent)) -> DhowResult<()> {
        let request = if self.needs_full_build {
            BuildRequest::initial()
        } else {
            BuildRequest::incremental(changes)
        };

        callback(WatchEvent::BuildStarted {
            initial: request.initial,
            changes: request.changes.len(),
        });

        match self
            .use_case
            .execute_with_events(&request, self.cache, self.build_events.clone())
        {
            Ok(report) => {
                self.needs_full_build = false;
                callback(WatchEvent::BuildComplete {
                    pages: report.pages.rebuilt.len(),
                    written: report.pages.written.len(),
                    deleted: report.pages.deleted.len(),
                    assets: report.assets.copied.len() + report.assets.removed.len(),
                });
            }
            Err(err @ DhowError::OverlappingDirectories { .. }) => return Err(err),
            Err(err) => {
                tracing::error!(error = %err, "build failed");
                callback(WatchEvent::Error {
                    message: err.to_string(),
                });
            }
        }

        Ok(())
    }
}
