//! Build Module
//!
//! Orchestrates site builds for Dhow.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`PageBuildOptions`, `SiteBuildOptions`)
//! - `result` - Result types (`PageBuildReport`, `SiteBuildReport`)
//! - `pages` - The incremental page builder (`PageBuilder`)
//! - `assets` - Public asset sync (`PublicAssets`)
//! - `stylesheets` - CSS post-processing pass
//! - `use_case` - The whole-site build (`SiteBuildUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use dhow::application::build::{SiteBuildOptions, SiteBuildUseCase};
//!
//! let use_case = SiteBuildUseCase::new(fs, transpiler, runtime, stylesheets, options);
//! let mut cache = PageCache::new();
//! let report = use_case.execute(&BuildRequest::initial(), &mut cache)?;
//! ```

mod assets;
mod options;
mod pages;
mod result;
mod stylesheets;
mod use_case;

pub use assets::PublicAssets;
pub use options::{PageBuildOptions, SiteBuildOptions, STAGING_DIR};
pub use pages::PageBuilder;
pub use result::{AssetSyncReport, PageBuildReport, SiteBuildReport};
pub use stylesheets::process_stylesheets;
pub use use_case::SiteBuildUseCase;
