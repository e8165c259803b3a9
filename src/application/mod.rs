//! Application Layer
//!
//! Use cases that orchestrate the build flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `SiteBuildUseCase` - One logical build (pages, public assets, stylesheets)
//! - `PageBuilder` - Incremental page rendering against the session cache

pub mod build;

pub use build::{
    AssetSyncReport, PageBuildOptions, PageBuildReport, PageBuilder, PublicAssets,
    SiteBuildOptions, SiteBuildReport, SiteBuildUseCase, STAGING_DIR,
};
