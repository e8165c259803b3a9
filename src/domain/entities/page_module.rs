//! Validated page and component modules
//!
//! A transpiled module is only used through one of these types. Loading one
//! inspects the module's exports once and rejects anything that does not
//! satisfy the contract, so call sites never inspect exports themselves.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::ports::{ExportKind, ModuleShape, PageRuntime, RenderedPage};
use crate::error::{DhowError, DhowResult};

/// Capabilities of a page that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCapabilities {
    /// Exports `getPaths`
    pub enumerates_paths: bool,
    /// Exports `getProps`
    pub provides_props: bool,
}

impl ModuleShape {
    /// Check the page contract: a callable default export, and callable
    /// `getPaths`/`getProps` when present.
    pub fn page_capabilities(&self) -> Result<PageCapabilities, String> {
        if !self.default.is_function() {
            return Err("does not `export default` a function".to_string());
        }
        if !matches!(self.get_props, ExportKind::Missing | ExportKind::Function) {
            return Err("has an invalid `getProps` export".to_string());
        }
        if !matches!(self.get_paths, ExportKind::Missing | ExportKind::Function) {
            return Err("has an invalid `getPaths` export".to_string());
        }
        Ok(PageCapabilities {
            enumerates_paths: self.get_paths.is_function(),
            provides_props: self.get_props.is_function(),
        })
    }
}

/// A page module bound to the runtime that evaluates it
pub struct PageModule<'r> {
    source: PathBuf,
    staged: PathBuf,
    capabilities: PageCapabilities,
    runtime: &'r dyn PageRuntime,
}

impl<'r> PageModule<'r> {
    /// Inspect and validate the staged module transpiled from `source`
    pub fn load(runtime: &'r dyn PageRuntime, staged: &Path, source: &Path) -> DhowResult<Self> {
        let shape = runtime.inspect(staged)?;
        let capabilities = shape
            .page_capabilities()
            .map_err(|reason| DhowError::MalformedPage {
                file: source.to_path_buf(),
                reason,
            })?;

        Ok(Self {
            source: source.to_path_buf(),
            staged: staged.to_path_buf(),
            capabilities,
            runtime,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn capabilities(&self) -> PageCapabilities {
        self.capabilities
    }

    /// Route suffixes from `getPaths`, or `None` when the page does not enumerate
    pub fn paths(&self) -> DhowResult<Option<Vec<String>>> {
        if !self.capabilities.enumerates_paths {
            return Ok(None);
        }
        self.runtime.paths(&self.staged).map(Some)
    }

    /// Props for a route suffix; `{}` when the page has no `getProps`
    pub fn props(&self, suffix: &str) -> DhowResult<Value> {
        if !self.capabilities.provides_props {
            return Ok(Value::Object(Default::default()));
        }
        self.runtime.props(&self.staged, suffix)
    }

    /// Render through `wrapper` (the `_app.js` component) when given
    pub fn render(&self, wrapper: Option<&Component>, props: &Value) -> DhowResult<RenderedPage> {
        self.runtime
            .render(&self.staged, wrapper.map(Component::staged), props)
    }
}

/// A module whose default export is a component (`_app.js`, `_document.js`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    source: PathBuf,
    staged: PathBuf,
}

impl Component {
    /// Inspect and validate the staged component transpiled from `source`
    pub fn load(runtime: &dyn PageRuntime, staged: &Path, source: &Path) -> DhowResult<Self> {
        let shape = runtime.inspect(staged)?;
        if !shape.default.is_function() {
            return Err(DhowError::MalformedComponent {
                file: source.to_path_buf(),
                reason: "default export is not a function".to_string(),
            });
        }
        Ok(Self {
            source: source.to_path_buf(),
            staged: staged.to_path_buf(),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn staged(&self) -> &Path {
        &self.staged
    }
}
