//! Configuration module for Dhow
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DHOW_*)
//! 3. Project config (`dhow.toml` at the project root)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{parse_with_warnings, CONFIG_FILE};
pub use types::{BuildConfig, Config, PathsConfig, ToolsConfig};
