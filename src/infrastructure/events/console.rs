//! Console Event Sink
//!
//! Human readable build progress, one line per notable event.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::domain::ports::{BuildEvent, BuildEventSink};

/// Prints build progress relative to a base directory
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    base: std::path::PathBuf,
    verbose: bool,
}

impl ConsoleEventSink {
    /// Write to stdout; paths are shown relative to `base`
    pub fn stdout(base: impl Into<std::path::PathBuf>, verbose: bool) -> Self {
        Self::with_writer(base, verbose, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(
        base: impl Into<std::path::PathBuf>,
        verbose: bool,
        writer: W,
    ) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            base: base.into(),
            verbose,
        }
    }

    fn relative<'p>(&self, path: &'p Path) -> std::path::Display<'p> {
        path.strip_prefix(&self.base).unwrap_or(path).display()
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }
}

impl BuildEventSink for ConsoleEventSink {
    fn on_event(&self, event: BuildEvent) {
        let text = match event {
            BuildEvent::Started {
                initial: true,
                ..
            } => "Building site".to_string(),
            BuildEvent::Started { change_count, .. } => {
                format!("Rebuilding ({} change(s))", change_count)
            }
            BuildEvent::CacheMiss { path } => {
                format!("  ! no recorded outputs for {}", self.relative(&path))
            }
            BuildEvent::OutputDeleted { path } => format!("  - {}", self.relative(&path)),
            BuildEvent::RouteWritten { path, .. } => format!("  + {}", self.relative(&path)),
            BuildEvent::PageBuilt {
                source,
                route_count,
            } if self.verbose => {
                format!("  {} ({} route(s))", self.relative(&source), route_count)
            }
            BuildEvent::AssetCopied { path } if self.verbose => {
                format!("  = {}", self.relative(&path))
            }
            BuildEvent::StylesheetProcessed { path } if self.verbose => {
                format!("  ~ {}", self.relative(&path))
            }
            BuildEvent::Completed {
                page_count,
                written_count,
                deleted_count,
            } => format!(
                "Done: {} page(s), {} written, {} deleted",
                page_count, written_count, deleted_count
            ),
            _ => return,
        };
        self.line(text);
    }
}
