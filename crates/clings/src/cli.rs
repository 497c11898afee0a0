//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the clings CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Default maximum number of todos shown by `search`.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// clings - query task lists with SQL-like filter expressions
#[derive(Parser, Debug)]
#[command(name = "clings")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search todos by text, shortcuts, or a filter expression
    ///
    /// All given criteria must hold. With none, every todo matches.
    ///
    /// # Filter Syntax
    ///
    ///   FIELDS: id, name, notes, status, due, tags, project, area, created
    ///   OPERATORS: =, !=, <, <=, >, >=, LIKE, CONTAINS, IN, IS NULL, IS NOT NULL
    ///   LOGIC: AND, OR (left to right), NOT, ( )
    ///
    /// # Examples
    ///
    ///   clings search meeting
    ///   clings search --tag work --due tomorrow
    ///   clings search --where "status = open AND due < today"
    ///   clings search --where "tags CONTAINS 'work'" --input todos.json
    #[command(alias = "s")]
    Search {
        /// Text to find in todo names and notes (case-insensitive)
        query: Option<String>,

        /// Filter expression to select todos
        #[arg(long = "where", short = 'w', value_name = "FILTER")]
        filter: Option<String>,

        /// Only todos with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only todos in this project
        #[arg(long)]
        project: Option<String>,

        /// Only todos due on this day (today, friday, 2025-01-31, ...)
        #[arg(long)]
        due: Option<String>,

        /// JSON file holding an array of todos (default: config, then stdin)
        #[arg(short, long, env = "CLINGS_INPUT")]
        input: Option<PathBuf>,

        /// Maximum todos to show (0 = unlimited; default: config, then 50)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Parse a filter expression and show how it was understood
    Check {
        /// Filter expression to parse
        filter: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Write a default config file if none exists
    Init,
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
