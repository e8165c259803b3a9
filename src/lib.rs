//! Dhow - incremental static-site generator for JSX page modules
//!
//! Pages under a pages directory are transpiled, evaluated and rendered to
//! HTML files under an output directory. Between builds a page cache records
//! which outputs each source produced and which local modules it imports, so
//! a change rebuilds only the pages it can affect.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod watcher;

// Re-exports for convenience
pub use application::{SiteBuildOptions, SiteBuildReport, SiteBuildUseCase};
pub use config::Config;
pub use domain::entities::PageCache;
pub use domain::value_objects::{BuildRequest, ChangeEvent, ChangeKind, Propagation};
pub use error::{DhowError, DhowResult};
pub use watcher::{watch, WatchEvent, WatchOptions};
