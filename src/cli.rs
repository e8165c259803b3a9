use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Dhow - incremental static-site generator for JSX pages
#[derive(Parser, Debug)]
#[command(name = "dhow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of `dhow.toml` at the project root
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every page once
    Build(SiteArgs),

    /// Build, then rebuild affected pages whenever a file changes
    Watch(SiteArgs),
}

/// Directory layout and build flags shared by both commands
#[derive(Args, Debug, Clone, Default)]
pub struct SiteArgs {
    /// Project root (discovered from the current directory when omitted)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Pages directory, relative to the project root
    #[arg(long, value_name = "DIR")]
    pub pages: Option<PathBuf>,

    /// Output directory, relative to the project root
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Public asset directory, relative to the project root
    #[arg(long, value_name = "DIR")]
    pub public: Option<PathBuf>,

    /// Follow dependency changes through every level of importers
    #[arg(long)]
    pub transitive: bool,

    /// Keep existing files in the output directory on the initial build
    #[arg(long)]
    pub no_clean: bool,
}
