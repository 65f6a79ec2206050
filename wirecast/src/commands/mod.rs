mod check;
mod completions;
mod parse;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use parse::ParseCommand;

/// Extension trait for exiting on description errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for wirecast_description::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "wirecast")]
#[command(version)]
#[command(about = "Map HTTP responses onto models declared in a TOML service description")]
pub(crate) struct Cli {
    /// Log parse decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Parse(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a saved HTTP response for an operation
    Parse(ParseCommand),

    /// Validate a service description and summarise it
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
