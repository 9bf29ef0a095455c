//! Catalog Minder - a discography catalog manager.
//!
//! Maintains a single artist's track catalog (titles, ISRC/UPC codes,
//! languages, streaming links, lyrics) in a local JSON database, with
//! optional AI-generated track commentary. Runs as one-shot CLI
//! commands or as an interactive browse shell.

pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod guard;
pub mod insight;
pub mod model;
pub mod shell;
pub mod store;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("catalog_minder=info".parse().unwrap()))
        .init();

    // Try to run a CLI command
    if cli::run_command(&args)? {
        // A command was executed, exit normally
        return Ok(());
    }

    // No command specified, enter the interactive shell
    shell::run()
}
