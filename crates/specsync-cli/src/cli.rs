use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "specsync",
    about = "Specsync: reconcile design-spec CSV sheets against the design store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload spec sheets, writing only the rows that changed
    Upload {
        /// CSV sheets or directories containing them
        files: Vec<String>,

        /// Directory to search for sheets
        #[arg(long, short = 'd')]
        dir: Option<String>,

        /// Search directories recursively
        #[arg(long, short = 'r')]
        recursive: bool,

        /// Parse and report without contacting the design store
        #[arg(long)]
        dry_run: bool,

        /// Keep uploading remaining files after one fails
        #[arg(long)]
        continue_on_error: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate sheets offline: status determination and rule violations
    Check {
        /// CSV sheets or directories containing them
        files: Vec<String>,

        /// Directory to search for sheets
        #[arg(long, short = 'd')]
        dir: Option<String>,

        /// Search directories recursively
        #[arg(long, short = 'r')]
        recursive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
