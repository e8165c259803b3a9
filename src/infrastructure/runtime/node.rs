//! Node.js page runtime
//!
//! Evaluates staged modules by running a small runner script under `node`.
//! `prepare` installs two files into the staging area:
//!
//! - `node_modules/dhow/index.js`: the JSX runtime pages import
//! - `.dhow/runner.js`: the command entry point
//!
//! Every call is one `node` process printing a single JSON value, so modules
//! are always evaluated fresh. Props travel over stdin, since a single
//! argument is capped well below the size of a typical post body.

use std::cell::RefCell;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::Node;
use crate::domain::ports::{ExportKind, ModuleShape, PageRuntime, RenderedPage};
use crate::error::{DhowError, DhowResult};

const RUNTIME_SOURCE: &str = include_str!("dhow.js");
const RUNNER_SOURCE: &str = include_str!("runner.js");

/// Placeholder passed to `render` when there is no wrapper
const NO_WRAPPER: &str = "-";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShapeReport {
    default: String,
    get_paths: String,
    get_props: String,
}

/// Page runtime backed by a `node` executable
pub struct NodeRuntime {
    program: PathBuf,
    staging: RefCell<Option<PathBuf>>,
}

impl NodeRuntime {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            staging: RefCell::new(None),
        }
    }

    /// Path of the runner script inside `staging`
    pub fn runner_path(staging: &Path) -> PathBuf {
        staging.join(".dhow").join("runner.js")
    }

    /// Path of the JSX runtime module inside `staging`
    pub fn module_path(staging: &Path) -> PathBuf {
        staging.join("node_modules").join("dhow").join("index.js")
    }

    fn current_staging(&self, module: &Path) -> DhowResult<PathBuf> {
        self.staging
            .borrow()
            .clone()
            .ok_or_else(|| DhowError::Runtime {
                module: module.to_path_buf(),
                message: "runtime used before the staging area was prepared".to_string(),
            })
    }

    fn run<T: DeserializeOwned>(&self, module: &Path, args: &[&OsStr]) -> DhowResult<T> {
        self.run_with_input(module, args, None)
    }

    /// Run the runner, feeding `input` to its stdin when given
    fn run_with_input<T: DeserializeOwned>(
        &self,
        module: &Path,
        args: &[&OsStr],
        input: Option<&[u8]>,
    ) -> DhowResult<T> {
        let staging = self.current_staging(module)?;
        let runner = Self::runner_path(&staging);
        let spawn_error = |e: io::Error| DhowError::Runtime {
            module: module.to_path_buf(),
            message: format!("failed to run {}: {}", self.program.display(), e),
        };

        let mut child = Command::new(&self.program)
            .arg(&runner)
            .args(args)
            .current_dir(&staging)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Written from its own thread so a child filling stdout cannot stall us
        let writer = match (input, child.stdin.take()) {
            (Some(input), Some(mut stdin)) => {
                let input = input.to_vec();
                Some(thread::spawn(move || stdin.write_all(&input)))
            }
            _ => None,
        };
        let output = child.wait_with_output().map_err(spawn_error)?;
        let written = match writer.map(|writer| writer.join()) {
            Some(Ok(result)) => result,
            Some(Err(_)) => Err(io::Error::other("stdin writer panicked")),
            None => Ok(()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DhowError::Runtime {
                module: module.to_path_buf(),
                message: format!("exited with {}\n{}", output.status, stderr.trim()),
            });
        }
        written.map_err(spawn_error)?;

        serde_json::from_slice(&output.stdout).map_err(|e| DhowError::Runtime {
            module: module.to_path_buf(),
            message: format!("unreadable runner output: {}", e),
        })
    }
}

impl PageRuntime for NodeRuntime {
    fn prepare(&self, staging: &Path) -> DhowResult<()> {
        for (path, source) in [
            (Self::module_path(staging), RUNTIME_SOURCE),
            (Self::runner_path(staging), RUNNER_SOURCE),
        ] {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, source)?;
        }

        self.staging.replace(Some(staging.to_path_buf()));
        tracing::debug!(staging = %staging.display(), "node runtime prepared");
        Ok(())
    }

    fn inspect(&self, module: &Path) -> DhowResult<ModuleShape> {
        let report: ShapeReport = self.run(module, &[OsStr::new("inspect"), module.as_os_str()])?;
        Ok(ModuleShape {
            default: ExportKind::from_typeof(&report.default),
            get_paths: ExportKind::from_typeof(&report.get_paths),
            get_props: ExportKind::from_typeof(&report.get_props),
        })
    }

    fn paths(&self, module: &Path) -> DhowResult<Vec<String>> {
        self.run(module, &[OsStr::new("paths"), module.as_os_str()])
    }

    fn props(&self, module: &Path, suffix: &str) -> DhowResult<Value> {
        self.run(
            module,
            &[OsStr::new("props"), module.as_os_str(), OsStr::new(suffix)],
        )
    }

    fn render(
        &self,
        page: &Path,
        wrapper: Option<&Path>,
        props: &Value,
    ) -> DhowResult<RenderedPage> {
        let props = serde_json::to_vec(props)?;
        let wrapper = wrapper
            .map(Path::as_os_str)
            .unwrap_or_else(|| OsStr::new(NO_WRAPPER));
        self.run_with_input(
            page,
            &[OsStr::new("render"), page.as_os_str(), wrapper],
            Some(&props),
        )
    }

    fn document(&self, module: &Path) -> DhowResult<Node> {
        self.run(module, &[OsStr::new("document"), module.as_os_str()])
    }
}
