//! Command implementations and the setup they share

pub mod build;
mod project_root;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use dhow::config::Config;
use dhow::domain::ports::BuildEventSink;
use dhow::infrastructure::{
    ConsoleEventSink, EsbuildTranspiler, JsonEventSink, LocalFs, NodeRuntime, PostcssCli,
};
use dhow::{Propagation, SiteBuildOptions, SiteBuildUseCase};

use crate::cli::SiteArgs;
use project_root::discover_project_root;

/// Flags accepted before or after any subcommand
pub struct GlobalArgs {
    pub json: bool,
    pub verbose: u8,
    pub config: Option<PathBuf>,
}

/// Use case wired to the real tools
pub type LocalSite = SiteBuildUseCase<LocalFs, EsbuildTranspiler, NodeRuntime, PostcssCli>;

/// Resolved project: where it lives, its config, and the build layout
pub struct Site {
    pub project_root: PathBuf,
    pub config: Config,
    pub options: SiteBuildOptions,
}

impl Site {
    /// Resolve the project root, load its config and apply CLI overrides
    pub fn load(global: &GlobalArgs, args: &SiteArgs) -> Result<Self> {
        let start = match &args.project {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("failed to read the current directory")?,
        };
        let project_root = discover_project_root(&start);
        let project_root = project_root
            .canonicalize()
            .with_context(|| format!("project root {} not found", project_root.display()))?;

        let (config, warnings) = match &global.config {
            Some(path) => {
                let (config, warnings) = Config::load_with_warnings(path)
                    .with_context(|| format!("failed to load {}", path.display()))?;
                (config.with_env_overrides(), warnings)
            }
            None => Config::load_or_default(&project_root)?,
        };
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        let options = build_options(&project_root, &config, args);
        tracing::debug!(
            root = %project_root.display(),
            pages = %options.pages_root().display(),
            out = %options.out_dir().display(),
            "resolved site layout"
        );

        Ok(Self {
            project_root,
            config,
            options,
        })
    }

    pub fn use_case(&self) -> LocalSite {
        let tools = &self.config.tools;
        SiteBuildUseCase::new(
            LocalFs::new(),
            EsbuildTranspiler::new(&tools.esbuild),
            NodeRuntime::new(&tools.node),
            PostcssCli::new(&tools.postcss, &self.project_root),
            self.options.clone(),
        )
    }

    /// NDJSON or console progress for `command`
    pub fn event_sink(&self, global: &GlobalArgs, command: &'static str) -> Arc<dyn BuildEventSink> {
        if global.json {
            Arc::new(JsonEventSink::stdout(command))
        } else {
            Arc::new(ConsoleEventSink::stdout(&self.project_root, global.verbose > 0))
        }
    }
}

/// CLI flags win over config values
fn build_options(project_root: &Path, config: &Config, args: &SiteArgs) -> SiteBuildOptions {
    let resolve = |flag: &Option<PathBuf>, configured: &Path| {
        project_root.join(flag.as_deref().unwrap_or(configured))
    };

    let propagation = if args.transitive {
        Propagation::Transitive
    } else {
        config.build.propagation
    };

    SiteBuildOptions::new(
        resolve(&args.pages, &config.paths.pages),
        resolve(&args.out, &config.paths.out),
    )
    .with_public_dir(resolve(&args.public, &config.paths.public))
    .with_propagation(propagation)
    .with_clean(config.build.clean && !args.no_clean)
}
