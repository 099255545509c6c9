//! # stubmerge CLI
//!
//! Binary entry point. Parses arguments with `clap`, sets up logging and hands
//! off to the `update` command. The fetch and consolidation logic lives in
//! the `stubmerge` library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
