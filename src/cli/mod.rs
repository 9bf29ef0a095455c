//! Command-line interface for catalog-minder.
//!
//! This module provides CLI commands for listing, inspecting and
//! mutating the track catalog without entering the interactive shell.

mod commands;

pub use commands::{Cli, Commands, run_command};
