//! File watcher for continuous rebuilds
//!
//! Implements the `watch` command with:
//! - Debouncing (100ms) and per-path coalescing of change kinds
//! - Content-hash filtering of no-op modifications
//! - Incremental builds against one page cache per session
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod event;
mod sync;

pub use event::{classify, WatchEvent, WatchOptions, DEBOUNCE_MS};
pub use sync::watch;
