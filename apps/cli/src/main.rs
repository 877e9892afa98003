//! sidenav CLI: rebuild site navigation from a rendered documentation sidebar.
//!
//! Reads a sidebar HTML page, reconstructs its nested groups, and writes a
//! navigation configuration file.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
