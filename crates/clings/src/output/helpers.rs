//! Common helper functions for output formatting.

use chrono::NaiveDate;
use clings_filter::Status;
use owo_colors::OwoColorize;

/// Truncates an ID to 6 characters for display.
pub fn truncate_id(id: &str) -> String {
    id.chars().take(6).collect()
}

/// Truncates a string to a maximum number of characters, ending in `...`.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a status for display.
pub fn format_status(status: Status, use_colors: bool) -> String {
    let label = status.as_str();
    if !use_colors {
        return label.to_string();
    }
    match status {
        Status::Open => label.to_string(),
        Status::Completed => label.green().to_string(),
        Status::Canceled => label.dimmed().to_string(),
    }
}

/// Formats a due date relative to `today`.
pub fn format_due(due: Option<NaiveDate>, today: NaiveDate, use_colors: bool) -> String {
    let Some(date) = due else {
        return String::new();
    };

    let days = (date - today).num_days();
    let display = match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        _ => date.format("%b %d").to_string(),
    };

    if use_colors {
        if days < 0 {
            display.red().to_string()
        } else if days == 0 {
            display.yellow().to_string()
        } else {
            display
        }
    } else {
        display
    }
}

/// Formats tags for display.
pub fn format_tags(tags: &[String], max_len: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let formatted: Vec<String> = tags.iter().map(|t| format!("#{t}")).collect();
    truncate_str(&formatted.join(" "), max_len)
}
