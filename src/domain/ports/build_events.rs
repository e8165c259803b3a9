//! Build Event Port
//!
//! Provides an observable interface for build operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

/// Event emitted during a build
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    /// Build started
    Started { initial: bool, change_count: usize },

    /// A previously generated output was deleted
    OutputDeleted { path: PathBuf },

    /// A removed source had no recorded outputs (non-fatal)
    CacheMiss { path: PathBuf },

    /// Nothing to render for this incremental build
    PagesSkipped,

    /// Source files were transpiled into staging
    Transpiled { count: usize },

    /// One route was rendered and written
    RouteWritten { source: PathBuf, path: PathBuf },

    /// A page finished rendering all of its routes
    PageBuilt { source: PathBuf, route_count: usize },

    /// Public asset copied into the destination
    AssetCopied { path: PathBuf },

    /// Stylesheet post-processed in place
    StylesheetProcessed { path: PathBuf },

    /// Build completed
    Completed {
        page_count: usize,
        written_count: usize,
        deleted_count: usize,
    },
}

/// Trait for receiving build events
///
/// Implementations:
/// - `ConsoleEventSink`: human readable lines
/// - `JsonEventSink`: NDJSON event stream for CI
/// - `NoopEventSink`: silent operation
pub trait BuildEventSink: Send + Sync {
    /// Handle a build event
    fn on_event(&self, event: BuildEvent);

    /// Check if this sink wants per-file events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
