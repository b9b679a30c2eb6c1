use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct AppdirArgs {
    #[command(subcommand)]
    pub command: AppdirCommand,
}

#[derive(Debug, Subcommand)]
pub enum AppdirCommand {
    Download {
        name: String,
        #[arg(long)]
        folder: Option<String>,
        #[arg(long, short = 'o', value_name = "PATH")]
        output: PathBuf,
    },
}
