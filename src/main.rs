//! binlabel CLI: label images under a folder; use --summary to report progress without labeling.

use anyhow::Result;
use binlabel::engine::arg_parser::Cli;
use binlabel::engine::handle_run;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
