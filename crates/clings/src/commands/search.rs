//! Search command implementation.
//!
//! Reads todos as a JSON array and prints those matching the given criteria:
//! a filter expression, a text query, and tag, project and due shortcuts.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clings_filter::filter::{
    resolve_date, FilterEvaluator, FilterExpression, FilterOperator, FilterParser, FilterValue,
};
use clings_filter::Todo;

use super::config::Config;
use super::{CommandContext, CommandError, Result};
use crate::cli::DEFAULT_SEARCH_LIMIT;
use crate::output::{format_todos_json, format_todos_table};

/// Options for the search command.
#[derive(Debug, Default)]
pub struct SearchOptions {
    /// Text matched against todo names and notes.
    pub query: Option<String>,
    /// Filter expression.
    pub filter: Option<String>,
    /// Tag a todo must carry.
    pub tag: Option<String>,
    /// Project a todo must belong to.
    pub project: Option<String>,
    /// Day a todo must be due, in any date literal form.
    pub due: Option<String>,
    /// Todo file; `-` or none reads stdin.
    pub input: Option<PathBuf>,
    /// Maximum todos shown; 0 shows all.
    pub limit: Option<usize>,
}

/// Where todos are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TodoSource {
    File(PathBuf),
    Stdin,
}

impl TodoSource {
    /// Resolves the source: `--input` first, then the config default, then stdin.
    fn resolve(input: Option<&Path>, config: &Config) -> Self {
        match input.or(config.input.path.as_deref()) {
            Some(path) if path != Path::new("-") => TodoSource::File(path.to_path_buf()),
            _ => TodoSource::Stdin,
        }
    }

    fn describe(&self) -> String {
        match self {
            TodoSource::File(path) => path.display().to_string(),
            TodoSource::Stdin => "stdin".to_string(),
        }
    }

    fn read(&self) -> Result<Vec<Todo>> {
        let content = match self {
            TodoSource::File(path) => fs::read_to_string(path).map_err(|e| {
                CommandError::Input(format!("Failed to read {}: {}", path.display(), e))
            })?,
            TodoSource::Stdin => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        parse_todos(&content).map_err(|e| {
            CommandError::Input(format!("Invalid todos in {}: {}", self.describe(), e))
        })
    }
}

/// Decodes a JSON array of todos.
fn parse_todos(content: &str) -> serde_json::Result<Vec<Todo>> {
    serde_json::from_str(content)
}

/// Picks the effective limit: flag, then config, then the default.
/// Returns `None` for unlimited.
fn resolve_limit(flag: Option<usize>, config: &Config) -> Option<usize> {
    match flag.or(config.search.limit).unwrap_or(DEFAULT_SEARCH_LIMIT) {
        0 => None,
        n => Some(n),
    }
}

/// Joins `--where` and the shortcut options with AND, in that order.
///
/// Returns `None` when no criteria were given, which matches every todo.
fn build_expression(opts: &SearchOptions, today: NaiveDate) -> Result<Option<FilterExpression>> {
    let mut parts = Vec::new();

    if let Some(filter) = &opts.filter {
        parts.push(FilterParser::with_today(today).parse(filter)?);
    }
    if let Some(query) = &opts.query {
        parts.push(FilterExpression::or(
            text_condition("name", FilterOperator::Contains, query),
            text_condition("notes", FilterOperator::Contains, query),
        ));
    }
    if let Some(tag) = &opts.tag {
        parts.push(text_condition("tags", FilterOperator::Contains, tag));
    }
    if let Some(project) = &opts.project {
        parts.push(text_condition("project", FilterOperator::Equal, project));
    }
    if let Some(due) = &opts.due {
        let date = resolve_date(due, today).ok_or_else(|| {
            CommandError::InvalidArgument(format!("unrecognized due date '{}'", due))
        })?;
        parts.push(FilterExpression::condition(
            "due",
            FilterOperator::Equal,
            FilterValue::Date(date),
        ));
    }

    Ok(parts.into_iter().reduce(FilterExpression::and))
}

fn text_condition(field: &str, operator: FilterOperator, text: &str) -> FilterExpression {
    FilterExpression::condition(field, operator, FilterValue::String(text.to_string()))
}

/// Result of filtering before display.
#[derive(Debug)]
struct SearchResult<'a> {
    shown: Vec<&'a Todo>,
    matched: usize,
}

fn search<'a>(
    todos: &'a [Todo],
    expression: Option<&FilterExpression>,
    limit: Option<usize>,
) -> SearchResult<'a> {
    let mut shown = match expression {
        Some(expression) => FilterEvaluator::new(expression).filter_items(todos),
        None => todos.iter().collect(),
    };
    let matched = shown.len();
    if let Some(limit) = limit {
        shown.truncate(limit);
    }
    SearchResult { shown, matched }
}

/// Executes the search command.
///
/// # Arguments
///
/// * `ctx` - Command context with output settings
/// * `opts` - Search command options
/// * `config` - Loaded configuration, for input and limit defaults
///
/// # Errors
///
/// Returns an error if the filter expression or due date is invalid, or the
/// todos cannot be read.
pub fn execute(ctx: &CommandContext, opts: &SearchOptions, config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    execute_at(ctx, opts, config, today)
}

fn execute_at(
    ctx: &CommandContext,
    opts: &SearchOptions,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    // Build before reading so bad criteria never wait on stdin.
    let expression = build_expression(opts, today)?;

    let source = TodoSource::resolve(opts.input.as_deref(), config);
    let todos = source.read()?;
    let limit = resolve_limit(opts.limit, config);
    tracing::debug!(source = %source.describe(), todos = todos.len(), ?limit, "searching todos");

    let result = search(&todos, expression.as_ref(), limit);

    if ctx.json_output {
        let filter = expression.as_ref().map(ToString::to_string);
        println!(
            "{}",
            format_todos_json(filter.as_deref(), &result.shown, result.matched)?
        );
    } else if !ctx.quiet {
        print!(
            "{}",
            format_todos_table(&result.shown, result.matched, today, ctx.use_colors)
        );
    }

    Ok(())
}
