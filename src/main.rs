//! # Extension Assembler CLI
//!
//! Binary entry point for the `extension-assembler` command-line tool. It
//! parses the arguments with `clap` and hands over to the selected command;
//! everything else lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
