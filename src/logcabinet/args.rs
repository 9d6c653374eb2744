use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lcab")]
#[command(version, about = "Manage cabinets of numbered, append-only log sheets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory that holds the cabinets (defaults to config, then cwd)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new cabinet
    #[command(alias = "new")]
    Create {
        name: String,

        /// Description recorded in the control file
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Show a cabinet's name, description and sheet count
    Info { name: String },

    /// List the sheets in a cabinet
    #[command(alias = "ls")]
    List { name: String },

    /// Create a sheet and write entries to it (reads stdin if no entries given)
    Sheet {
        cabinet: String,

        sheet: String,

        /// Text written as the sheet's first line
        #[arg(short, long, default_value = "")]
        description: String,

        /// Sync after every entry, even when the auto-sync config is off
        #[arg(long)]
        sync: bool,

        /// Entries to write, one per argument
        #[arg(trailing_var_arg = true)]
        entries: Vec<String>,
    },

    /// Print a sheet's description and entries
    #[command(alias = "cat")]
    Show { cabinet: String, sheet: String },

    /// Delete a cabinet and all of its sheets
    #[command(alias = "rm")]
    Remove { name: String },

    /// Get or set configuration
    Config {
        /// Configuration key (root, auto-sync)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
