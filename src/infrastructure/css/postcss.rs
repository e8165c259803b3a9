//! PostCSS stylesheet processor
//!
//! Runs `postcss <file> --replace` from the project root so the project's
//! `postcss.config.js` applies. Without that file processing is disabled.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::domain::ports::StylesheetProcessor;
use crate::error::{DhowError, DhowResult};

/// Config file whose presence enables processing
pub const POSTCSS_CONFIG: &str = "postcss.config.js";

/// Stylesheet processor backed by the `postcss` CLI
pub struct PostcssCli {
    program: PathBuf,
    project_root: PathBuf,
    enabled: bool,
}

impl PostcssCli {
    pub fn new(program: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let enabled = project_root.join(POSTCSS_CONFIG).is_file();
        Self {
            program: program.into(),
            project_root,
            enabled,
        }
    }
}

impl StylesheetProcessor for PostcssCli {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn process(&self, file: &Path) -> DhowResult<()> {
        let output = Command::new(&self.program)
            .arg(file)
            .arg("--replace")
            .current_dir(&self.project_root)
            .output()
            .map_err(|e| DhowError::Stylesheet {
                file: file.to_path_buf(),
                message: format!("failed to run {}: {}", self.program.display(), e),
            })?;

        if !output.status.success() {
            return Err(DhowError::Stylesheet {
                file: file.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
