//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Docket - access-controlled document store
#[derive(Parser, Debug)]
#[command(name = "docket")]
#[command(author, version, about = "Docket document store", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "DOCKET_CONFIG", global = true)]
    pub config: Option<String>,

    /// Data file, overriding the configured one
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// User to act as
    #[arg(short, long, env = "DOCKET_USER", global = true)]
    pub user: Option<String>,

    /// Role held by the user (repeatable, or comma-separated)
    #[arg(
        short,
        long = "role",
        env = "DOCKET_ROLES",
        value_delimiter = ',',
        global = true
    )]
    pub roles: Vec<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns `true` if the command runs against a resource and so needs
    /// the configuration loaded first. `config` subcommands read the file
    /// themselves, so a broken file can still be inspected or replaced.
    pub fn needs_config(&self) -> bool {
        !matches!(self.command, Command::Config { .. })
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a document from a JSON object
    Create {
        /// Attributes, e.g. '{"title": "hello"}'
        attributes: String,
    },
    /// Print one document
    Read {
        /// Document id
        id: String,
    },
    /// Overwrite a document's attributes
    Replace {
        /// Document id
        id: String,
        /// New attributes
        attributes: String,
    },
    /// Merge attributes into a document
    Patch {
        /// Document id
        id: String,
        /// Attributes to merge
        attributes: String,
    },
    /// Delete a document
    Destroy {
        /// Document id
        id: String,
    },
    /// List documents
    List {
        /// JSON filter, e.g. '{"count": {"gt": 3}}'
        #[arg(long)]
        filter: Option<String>,

        /// Query-string style condition, e.g. `title=hello` or `count[gt]=3`
        #[arg(long = "where", value_name = "KEY=VALUE")]
        conditions: Vec<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print one value by dotted key
    Get {
        /// Dotted key, e.g. `resource.name`
        key: String,
    },
    /// Write a default config file
    Init {
        /// Where to write (defaults to the resolved config path)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}
