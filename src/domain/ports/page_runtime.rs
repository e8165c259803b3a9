//! PageRuntime port - evaluates transpiled page modules
//!
//! Page modules are JavaScript; the runtime is what can actually call their
//! exports. The domain only sees typed results: the shape of a module's
//! exports, enumerated route suffixes, props, and rendered markup.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::Node;
use crate::error::DhowResult;

/// What a single export turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportKind {
    /// Not exported at all
    Missing,
    /// A callable
    Function,
    /// Exported, but not callable (carries the runtime type name)
    Other(String),
}

impl ExportKind {
    /// Map a JavaScript `typeof` result
    pub fn from_typeof(type_name: &str) -> Self {
        match type_name {
            "undefined" | "missing" | "" => ExportKind::Missing,
            "function" => ExportKind::Function,
            other => ExportKind::Other(other.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ExportKind::Missing)
    }

    pub fn is_function(&self) -> bool {
        matches!(self, ExportKind::Function)
    }
}

/// Exports relevant to the page contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleShape {
    /// `export default`
    pub default: ExportKind,
    /// `export const getPaths`
    pub get_paths: ExportKind,
    /// `export const getProps`
    pub get_props: ExportKind,
}

/// Markup produced by rendering one route
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RenderedPage {
    /// Page markup (wrapper applied)
    pub html: String,
    /// Serialized elements the page asked to place in `<head>`
    #[serde(default)]
    pub head: Vec<String>,
}

/// Evaluates transpiled modules found in the staging area
pub trait PageRuntime {
    /// Write whatever support files the runtime needs into the staging area
    fn prepare(&self, _staging: &Path) -> DhowResult<()> {
        Ok(())
    }

    /// Report the kinds of the contract exports of `module`
    fn inspect(&self, module: &Path) -> DhowResult<ModuleShape>;

    /// Call `getPaths()`
    fn paths(&self, module: &Path) -> DhowResult<Vec<String>>;

    /// Call `getProps(suffix)`
    fn props(&self, module: &Path, suffix: &str) -> DhowResult<Value>;

    /// Render `page` with `props`, through `wrapper` when given
    fn render(&self, page: &Path, wrapper: Option<&Path>, props: &Value)
        -> DhowResult<RenderedPage>;

    /// Call the default export of a document module and return its tree
    fn document(&self, module: &Path) -> DhowResult<Node>;
}
