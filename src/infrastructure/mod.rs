//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `transpiler/` - esbuild subprocesses
//! - `runtime/` - Node.js page runtime
//! - `css/` - PostCSS stylesheet processing
//! - `events/` - Build event sinks (console, NDJSON)

pub mod css;
pub mod events;
pub mod fs;
pub mod runtime;
pub mod transpiler;

// Re-export for convenience
pub use css::PostcssCli;
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use runtime::NodeRuntime;
pub use transpiler::EsbuildTranspiler;
