//! wikipack CLI — offline encyclopedia snapshot builder.
//!
//! Scores a dump of article files with the processing pipeline and packs
//! the highest-ranked pages into a capacity-constrained snapshot.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
