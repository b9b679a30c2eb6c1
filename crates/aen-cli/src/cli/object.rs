use aen_core::models::View;
use clap::{Args, Subcommand};

use super::parsers::parse_view;

#[derive(Debug, Args)]
pub struct ObjectArgs {
    #[command(subcommand)]
    pub command: ObjectCommand,
}

#[derive(Debug, Subcommand)]
pub enum ObjectCommand {
    Get {
        id: String,
        #[arg(long, value_parser = parse_view)]
        view: Option<View>,
    },
    Delete {
        id: String,
    },
}
