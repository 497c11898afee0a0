use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::{load_config, Config};
use commands::search::SearchOptions;
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let (result, json_output) = match load_command_config(&cli) {
        Ok(config) => {
            let ctx = CommandContext::from_cli(&cli, &config);
            (run(&cli, &ctx, &config), ctx.json_output)
        }
        // Without a readable config only the flag can ask for JSON.
        Err(e) => (Err(e), cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&cli, &e, json_output);
            error_exit_code(&e)
        }
    }
}

/// Prints an error to stderr, as JSON when JSON output is on.
fn report_error(cli: &Cli, e: &CommandError, json_output: bool) {
    if json_output {
        let error_json = serde_json::json!({
            "error": {
                "code": error_code(e),
                "message": e.to_string(),
                "position": error_position(e),
            }
        });
        let rendered =
            serde_json::to_string_pretty(&error_json).unwrap_or_else(|_| error_json.to_string());
        eprintln!("{rendered}");
    } else {
        eprintln!("Error: {e}");
        if let (CommandError::Filter(err), Some(filter)) = (e, filter_text(cli)) {
            eprintln!("{}", commands::check::error_pointer(filter, err.position()));
        }
    }
}

/// Sets up tracing on stderr. `RUST_LOG` wins over the verbosity flags.
fn init_logging(cli: &Cli) {
    let default_filter = if cli.verbose {
        "clings=debug,clings_filter=debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(cli.verbose)
        .init();
}

/// Loads the config file. A broken file must not block the commands used to
/// inspect or fix it, so those fall back to defaults.
fn load_command_config(cli: &Cli) -> commands::Result<Config> {
    match &cli.command {
        Commands::Config { .. } | Commands::Completions { .. } => {
            Ok(load_config().unwrap_or_default())
        }
        _ => load_config(),
    }
}

fn run(cli: &Cli, ctx: &CommandContext, config: &Config) -> commands::Result<()> {
    match &cli.command {
        Commands::Search {
            query,
            filter,
            tag,
            project,
            due,
            input,
            limit,
        } => {
            let opts = SearchOptions {
                query: query.clone(),
                filter: filter.clone(),
                tag: tag.clone(),
                project: project.clone(),
                due: due.clone(),
                input: input.clone(),
                limit: *limit,
            };
            commands::search::execute(ctx, &opts, config)
        }
        Commands::Check { filter } => commands::check::execute(ctx, filter),
        Commands::Config { command } => dispatch_config(ctx, command.as_ref()),
        Commands::Completions { shell } => {
            commands::completions::execute(shell).map_err(CommandError::Io)
        }
    }
}

fn dispatch_config(ctx: &CommandContext, command: Option<&ConfigCommands>) -> commands::Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => commands::config::execute_show(ctx),
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Init) => commands::config::execute_init(ctx),
    }
}

/// Returns the filter expression the command was given, if any.
fn filter_text(cli: &Cli) -> Option<&str> {
    match &cli.command {
        Commands::Search {
            filter: Some(filter),
            ..
        }
        | Commands::Check { filter } => Some(filter.as_str()),
        _ => None,
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::InvalidArgument(_) => "INVALID_ARGUMENT",
        CommandError::Input(_) => "INPUT_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the byte offset of a filter error, for JSON output.
fn error_position(e: &CommandError) -> Option<usize> {
    match e {
        CommandError::Filter(err) => Some(err.position()),
        _ => None,
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Filter(_) => ExitCode::from(1),
        CommandError::Json(_) => ExitCode::from(1),
        CommandError::InvalidArgument(_) => ExitCode::from(1),
        CommandError::Input(_) => ExitCode::from(3),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Config(_) => ExitCode::from(5),
    }
}
