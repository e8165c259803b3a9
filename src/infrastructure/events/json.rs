//! JSON Event Sink
//!
//! Outputs build events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{BuildEvent, BuildEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
    command: &'static str,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            command,
        }
    }

    /// Write an event that is not a `BuildEvent` (watch lifecycle, errors)
    pub fn emit(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl BuildEventSink for JsonEventSink {
    fn on_event(&self, event: BuildEvent) {
        let command = self.command;
        let json = match event {
            BuildEvent::Started {
                initial,
                change_count,
            } => serde_json::json!({
                "event": "start",
                "command": command,
                "initial": initial,
                "changes": change_count,
            }),

            BuildEvent::OutputDeleted { path } => serde_json::json!({
                "event": "output_deleted",
                "command": command,
                "path": path.display().to_string(),
            }),

            BuildEvent::CacheMiss { path } => serde_json::json!({
                "event": "cache_miss",
                "command": command,
                "path": path.display().to_string(),
            }),

            BuildEvent::PagesSkipped => serde_json::json!({
                "event": "pages_skipped",
                "command": command,
            }),

            BuildEvent::Transpiled { count } => serde_json::json!({
                "event": "transpiled",
                "command": command,
                "count": count,
            }),

            BuildEvent::RouteWritten { source, path } => serde_json::json!({
                "event": "route_written",
                "command": command,
                "source": source.display().to_string(),
                "path": path.display().to_string(),
            }),

            BuildEvent::PageBuilt {
                source,
                route_count,
            } => serde_json::json!({
                "event": "page_built",
                "command": command,
                "source": source.display().to_string(),
                "routes": route_count,
            }),

            BuildEvent::AssetCopied { path } => serde_json::json!({
                "event": "asset_copied",
                "command": command,
                "path": path.display().to_string(),
            }),

            BuildEvent::StylesheetProcessed { path } => serde_json::json!({
                "event": "stylesheet_processed",
                "command": command,
                "path": path.display().to_string(),
            }),

            BuildEvent::Completed {
                page_count,
                written_count,
                deleted_count,
            } => serde_json::json!({
                "event": "complete",
                "command": command,
                "status": "success",
                "pages": page_count,
                "written": written_count,
                "deleted": deleted_count,
            }),
        };

        self.emit(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
