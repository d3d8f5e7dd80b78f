//! Sprintsheet CLI
//!
//! Serves the sprintsheet API and prints sprint reports.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use sprintsheet_cli::{Cli, commands, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    commands::run(cli).await?;
    Ok(())
}
