use clap::{Parser, Subcommand};

mod appdir;
mod args;
mod file;
mod object;
mod parsers;


pub use appdir::{AppdirArgs, AppdirCommand};
pub use args::{ConnectionArgs, LocaleArgs, SearchArgs};
pub use file::{FileArgs, FileCommand};
pub use object::{ObjectArgs, ObjectCommand};

#[derive(Debug, Parser)]
#[command(name = "aen")]
#[command(about = "Client for the Aeneis content repository API", version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and out again to check credentials and reachability.
    Ping,
    Object(ObjectArgs),
    Search(SearchArgs),
    Locales,
    Locale(LocaleArgs),
    File(FileArgs),
    Appdir(AppdirArgs),
}
