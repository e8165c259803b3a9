//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_events;
pub mod file_system;
pub mod page_runtime;
pub mod stylesheets;
pub mod transpiler;

pub use build_events::{BuildEvent, BuildEventSink, NoopEventSink};
pub use file_system::{FileSystem, FsError, FsResult};
pub use page_runtime::{ExportKind, ModuleShape, PageRuntime, RenderedPage};
pub use stylesheets::{NoopStylesheets, StylesheetProcessor};
pub use transpiler::{TranspileJob, Transpiler};
