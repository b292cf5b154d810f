//! Specsync CLI: the `specsync` command.

mod cli;
mod commands;
mod config;
mod path;
mod resolve;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_env("SPECSYNC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Upload {
            files,
            dir,
            recursive,
            dry_run,
            continue_on_error,
            json,
        } => commands::upload::run(commands::upload::Args {
            files,
            dir,
            recursive,
            dry_run,
            continue_on_error,
            json,
        }),

        Commands::Check {
            files,
            dir,
            recursive,
            json,
        } => commands::check::run(files, dir, recursive, json),
    }
}
