//! Dhow CLI - incremental static-site generator
//!
//! Usage: dhow <COMMAND>
//!
//! Commands:
//!   build   Build every page once
//!   watch   Build, then rebuild on change

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    dhow::logging::init(cli.verbose);

    let global = commands::GlobalArgs {
        json: cli.json,
        verbose: cli.verbose,
        config: cli.config,
    };

    match cli.command {
        Commands::Build(args) => commands::build::cmd_build(&global, &args),
        Commands::Watch(args) => commands::watch::cmd_watch(&global, &args),
    }
}
