//! Command-line arguments.

use clap::{Parser, Subcommand};

/// Sprintsheet - sprint reporting over a Google Sheets issue export
#[derive(Parser, Debug)]
#[command(name = "sprintsheet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Bind address (overrides `server.host`)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides `server.port`)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the sheet summary as JSON
    Summary,
    /// Print sprint progress as JSON
    Progress {
        /// Sprint name; defaults to the most recent sprint
        #[arg(short, long)]
        sprint: Option<String>,
    },
    /// Print a sprint burndown as JSON
    Burndown {
        /// Sprint name
        sprint: String,
    },
    /// Configuration management
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Get a value by dotted key, e.g. `server.port`
    Get {
        /// Dotted key
        key: String,
    },
    /// Write a default config file
    Init {
        /// Target file (defaults to the platform config path)
        #[arg(short, long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration as TOML
    Show,
}
