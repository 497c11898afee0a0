//! Search result formatting.

use chrono::NaiveDate;
use clings_filter::{Status, Todo};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_due, format_status, format_tags, truncate_id, truncate_str};

/// JSON output structure for the search command.
#[derive(Serialize)]
pub struct SearchOutput<'a> {
    pub filter: Option<&'a str>,
    pub todos: Vec<TodoOutput<'a>>,
    pub matched: usize,
    pub shown: usize,
    pub truncated: bool,
}

/// JSON output structure for a single todo.
#[derive(Serialize)]
pub struct TodoOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub status: Status,
    pub due: Option<NaiveDate>,
    pub tags: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub notes: &'a str,
}

impl<'a> From<&'a Todo> for TodoOutput<'a> {
    fn from(todo: &'a Todo) -> Self {
        Self {
            id: &todo.id,
            name: &todo.name,
            status: todo.status,
            due: todo.due_date,
            tags: &todo.tags,
            project: todo.project.as_deref(),
            area: todo.area.as_deref(),
            notes: &todo.notes,
        }
    }
}

/// Formats shown todos as JSON, recording how many matched in total.
///
/// `filter` is the combined criteria in filter syntax, if any were given.
pub fn format_todos_json(
    filter: Option<&str>,
    shown: &[&Todo],
    matched: usize,
) -> Result<String, serde_json::Error> {
    let output = SearchOutput {
        filter,
        todos: shown.iter().map(|todo| TodoOutput::from(*todo)).collect(),
        matched,
        shown: shown.len(),
        truncated: shown.len() < matched,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats shown todos as a table.
///
/// When fewer todos are shown than matched, a trailing line says so.
pub fn format_todos_table(
    shown: &[&Todo],
    matched: usize,
    today: NaiveDate,
    use_colors: bool,
) -> String {
    if shown.is_empty() && matched == 0 {
        return "No todos found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<8} {:<10} {:<12} {:<15} {:<20} {}",
        "ID", "Status", "Due", "Project", "Tags", "Name"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for todo in shown {
        let container = todo
            .project
            .as_deref()
            .or(todo.area.as_deref())
            .map(|name| truncate_str(name, 15))
            .unwrap_or_default();

        // Padding is applied to the plain text so color codes don't skew columns.
        let status = pad(
            format_status(todo.status, use_colors),
            todo.status.as_str().chars().count(),
            10,
        );
        let plain_due = format_due(todo.due_date, today, false);
        let due = pad(
            format_due(todo.due_date, today, use_colors),
            plain_due.chars().count(),
            12,
        );

        let line = format!(
            "{:<8} {} {} {:<15} {:<20} {}",
            truncate_id(&todo.id),
            status,
            due,
            container,
            format_tags(&todo.tags, 20),
            todo.name
        );
        output.push_str(&line);
        output.push('\n');
    }

    if shown.len() < matched {
        let note = format!("Showing {} of {} matching todos.", shown.len(), matched);
        if use_colors {
            output.push_str(&format!("{}\n", note.dimmed()));
        } else {
            output.push_str(&note);
            output.push('\n');
        }
    }

    output
}

fn pad(text: String, visible_len: usize, width: usize) -> String {
    let fill = width.saturating_sub(visible_len);
    format!("{text}{}", " ".repeat(fill))
}
