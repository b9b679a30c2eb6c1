use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct FileArgs {
    #[command(subcommand)]
    pub command: FileCommand,
}

#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List the files attached to an object.
    List { object_id: String },
    /// Download file content to a local path.
    Download {
        object_id: String,
        filename: String,
        #[arg(long, value_name = "NAME")]
        attribute: Option<String>,
        #[arg(long)]
        position: Option<u32>,
        #[arg(long, short = 'o', value_name = "PATH")]
        output: PathBuf,
    },
}
