use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use wirecast_description::DescriptionFile;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the service description (defaults to ./service.toml)
    #[arg(short, long, default_value = "service.toml")]
    pub description: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let file = DescriptionFile::open(&self.description).unwrap_or_exit();

        let report = ops::check(file.description(), file.path());
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
