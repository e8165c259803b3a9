//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ConfigWarning, Propagation};
use crate::error::DhowResult;

use super::loader;

/// Directory layout, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_pages")]
    pub pages: PathBuf,

    #[serde(default = "default_out")]
    pub out: PathBuf,

    #[serde(default = "default_public")]
    pub public: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            out: default_out(),
            public: default_public(),
        }
    }
}

fn default_pages() -> PathBuf {
    PathBuf::from("pages")
}

fn default_out() -> PathBuf {
    PathBuf::from("out")
}

fn default_public() -> PathBuf {
    PathBuf::from("public")
}

/// Build behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub propagation: Propagation,

    /// Wipe the destination before initial builds
    #[serde(default = "default_true")]
    pub clean: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            propagation: Propagation::default(),
            clean: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// External programs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_node")]
    pub node: String,

    #[serde(default = "default_esbuild")]
    pub esbuild: String,

    #[serde(default = "default_postcss")]
    pub postcss: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            node: default_node(),
            esbuild: default_esbuild(),
            postcss: default_postcss(),
        }
    }
}

fn default_node() -> String {
    "node".to_string()
}

fn default_esbuild() -> String {
    "esbuild".to_string()
}

fn default_postcss() -> String {
    "postcss".to_string()
}

/// Main configuration structure (`dhow.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DhowResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> DhowResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// `dhow.toml` under `project_root` if present, defaults otherwise;
    /// environment overrides applied either way
    pub fn load_or_default(project_root: &Path) -> DhowResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (DHOW_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Page-source root under `project_root`
    pub fn pages_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.pages)
    }

    /// Destination root under `project_root`
    pub fn out_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.out)
    }

    /// Public asset root under `project_root`
    pub fn public_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.public)
    }
}
