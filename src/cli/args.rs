//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Rebuild a company's management hierarchy from a flat employee roster
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Roster file, overrides config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub roster: Option<PathBuf>,

    /// Schema file, overrides config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub schema: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the hierarchy and the total salary (default)
    Show {
        /// Spaces per level, overrides config
        #[arg(short, long)]
        tab_width: Option<usize>,
    },

    /// Print the hierarchy with box drawing
    Tree,

    /// Print the total salary
    Total,

    /// List employees not reachable from any root
    Orphans,

    /// Check the roster against the schema
    Validate,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
}
