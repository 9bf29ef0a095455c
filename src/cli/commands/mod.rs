//! CLI command definitions and dispatch.
//!
//! Each subcommand family is implemented in its own submodule:
//! - `catalog`: list/show/add/edit/delete/reset over the track store
//! - `config`: show or persist settings
//! - `insight`: AI commentary for a single track

mod catalog;
mod config;
mod insight;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

pub use catalog::{
    AddArgs, EditArgs, cmd_add, cmd_delete, cmd_edit, cmd_list, cmd_reset, cmd_show,
};
pub use config::{ConfigArgs, cmd_config};
pub use insight::cmd_insight;

use crate::model::{Language, Project};

/// Catalog Minder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List catalog tracks, optionally filtered
    List {
        /// Match against title, version label, ISRC or UPC
        #[arg(short, long)]
        search: Option<String>,
        /// Only tracks performed in this language
        #[arg(short, long)]
        language: Option<Language>,
        /// Only tracks in this release project
        #[arg(short, long)]
        project: Option<Project>,
        /// Only editors' picks
        #[arg(long)]
        picks: bool,
    },
    /// Show the full record for one track
    Show {
        /// Track id
        id: String,
    },
    /// Add a new track to the catalog
    Add(AddArgs),
    /// Update fields of an existing track
    Edit(EditArgs),
    /// Delete a track (asks for confirmation)
    Delete {
        /// Track id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// AI commentary about a track
    Insight {
        /// Track id
        id: String,
        /// Gemini API key (or set GEMINI_API_KEY env var)
        #[arg(short, long, env = "GEMINI_API_KEY")]
        api_key: Option<String>,
    },
    /// Drop the catalog and restore the bundled seed data
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show or change settings (API key, database path, default artist)
    Config(ConfigArgs),
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command
/// was specified (meaning the interactive shell should launch).
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Some(Commands::List {
            search,
            language,
            project,
            picks,
        }) => {
            cmd_list(search.as_deref(), *language, *project, *picks)?;
            Ok(true)
        }
        Some(Commands::Show { id }) => {
            cmd_show(id)?;
            Ok(true)
        }
        Some(Commands::Add(args)) => {
            cmd_add(args)?;
            Ok(true)
        }
        Some(Commands::Edit(args)) => {
            cmd_edit(args)?;
            Ok(true)
        }
        Some(Commands::Delete { id, yes }) => {
            cmd_delete(id, *yes)?;
            Ok(true)
        }
        Some(Commands::Insight { id, api_key }) => {
            let rt = Runtime::new()?;
            cmd_insight(&rt, id, api_key.as_deref())?;
            Ok(true)
        }
        Some(Commands::Reset { yes }) => {
            cmd_reset(*yes)?;
            Ok(true)
        }
        Some(Commands::Config(args)) => {
            cmd_config(args)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
