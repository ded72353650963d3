//! watchrun CLI
//!
//! Usage: <paths on stdin> | watchrun [OPTIONS] <PROGRAM> [ARGS]...

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::watch::cmd_watch(cli)
}
