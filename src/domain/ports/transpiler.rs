//! Transpiler port - turns JSX page sources into runnable modules

use std::path::{Path, PathBuf};

use crate::error::DhowResult;

/// One source file and where its transpiled output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileJob {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl TranspileJob {
    /// Job for `source` under `source_root`, mirrored into `staging`
    pub fn mirrored(source: &Path, source_root: &Path, staging: &Path) -> Self {
        let relative = source.strip_prefix(source_root).unwrap_or(source);
        Self {
            source: source.to_path_buf(),
            output: staging.join(relative),
        }
    }
}

/// Transpiles and bundles modules into the staging area.
///
/// Every output must be self-contained: local imports are bundled so the
/// runtime never resolves them at render time.
pub trait Transpiler {
    /// Write whatever support files transpilation needs into the staging area
    fn prepare(&self, _staging: &Path) -> DhowResult<()> {
        Ok(())
    }

    /// Transpile every job; jobs are independent and may run concurrently
    fn transpile(&self, jobs: &[TranspileJob]) -> DhowResult<()>;
}
