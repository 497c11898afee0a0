//! Command implementations for the clings CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod check;
pub mod completions;
pub mod config;
pub mod search;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter parsing error.
    #[error("filter error: {0}")]
    Filter(#[from] clings_filter::filter::FilterError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A command-line value was not understood.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Todo input could not be read or decoded.
    #[error("input error: {0}")]
    Input(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are off when `--no-color` is given, when `NO_COLOR` is set,
    /// or when the config file sets `output.color = false`.
    pub fn from_cli(cli: &Cli, config: &config::Config) -> Self {
        let color_configured = config.output.color.unwrap_or(true);
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json || config.output.json.unwrap_or(false),
            use_colors: !cli.no_color && !no_color_env && color_configured,
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}
