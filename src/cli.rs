//! Command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "cgrid",
    version,
    about = "Browse a content collection in a keyboard navigable grid"
)]
pub struct Cli {
    /// Collection feed URL or JSON file (overrides `source` in the config)
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// Number of rows in the grid
    #[arg(short, long, global = true)]
    pub rows: Option<usize>,

    /// Path to an alternate config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the grid view as JSON after replaying keys
    Snapshot {
        /// Comma separated key names, e.g. Right,Right,Down
        #[arg(short, long, default_value = "")]
        keys: String,
    },

    /// Show the effective configuration
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
