//! esbuild transpiler
//!
//! Bundles every page into a self-contained CommonJS module for Node. JSX is
//! compiled against `Dhow.createElement`, and `Dhow` is injected into every
//! file through a shim, so pages never import it themselves. The `dhow`
//! package stays external and is resolved from staging at render time.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::domain::ports::{TranspileJob, Transpiler};
use crate::error::{DhowError, DhowResult};

const IMPORT_SHIM: &str = "import * as Dhow from 'dhow'\nexport { Dhow }\n";

/// Transpiler backed by the `esbuild` executable
pub struct EsbuildTranspiler {
    program: PathBuf,
    shim: RefCell<Option<PathBuf>>,
}

impl EsbuildTranspiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            shim: RefCell::new(None),
        }
    }

    /// Path of the import shim inside `staging`
    pub fn shim_path(staging: &Path) -> PathBuf {
        staging.join(".dhow").join("import-shim.js")
    }

    fn arguments(job: &TranspileJob, shim: &Path) -> Vec<String> {
        vec![
            job.source.display().to_string(),
            format!("--outfile={}", job.output.display()),
            "--bundle".to_string(),
            "--format=cjs".to_string(),
            "--platform=node".to_string(),
            "--loader:.js=jsx".to_string(),
            "--jsx-factory=Dhow.createElement".to_string(),
            "--jsx-fragment=Dhow.Fragment".to_string(),
            "--external:dhow".to_string(),
            format!("--inject:{}", shim.display()),
            "--log-level=error".to_string(),
        ]
    }

    fn spawn(&self, job: &TranspileJob, shim: &Path) -> DhowResult<Child> {
        Command::new(&self.program)
            .args(Self::arguments(job, shim))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DhowError::Transpile {
                file: job.source.clone(),
                message: format!("failed to run {}: {}", self.program.display(), e),
            })
    }
}

impl Transpiler for EsbuildTranspiler {
    fn prepare(&self, staging: &Path) -> DhowResult<()> {
        let shim = Self::shim_path(staging);
        if let Some(parent) = shim.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&shim, IMPORT_SHIM)?;

        self.shim.replace(Some(shim));
        Ok(())
    }

    fn transpile(&self, jobs: &[TranspileJob]) -> DhowResult<()> {
        let Some(first) = jobs.first() else {
            return Ok(());
        };
        let shim = self
            .shim
            .borrow()
            .clone()
            .ok_or_else(|| DhowError::Transpile {
                file: first.source.clone(),
                message: "transpiler used before the staging area was prepared".to_string(),
            })?;

        // Spawn everything first, then wait for every child even after a failure
        let children: Vec<(&TranspileJob, DhowResult<Child>)> = jobs
            .iter()
            .map(|job| (job, self.spawn(job, &shim)))
            .collect();

        let mut first_error = None;
        for (job, child) in children {
            let result = child.and_then(|child| {
                let output = child.wait_with_output().map_err(|e| DhowError::Transpile {
                    file: job.source.clone(),
                    message: e.to_string(),
                })?;
                if output.status.success() {
                    return Ok(());
                }
                Err(DhowError::Transpile {
                    file: job.source.clone(),
                    message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                })
            });

            match result {
                Ok(()) => tracing::trace!(source = %job.source.display(), "transpiled"),
                Err(err) if first_error.is_none() => first_error = Some(err),
                Err(err) => tracing::warn!("{}", err),
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
