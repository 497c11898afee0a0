//! The task record filters are usually evaluated against.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::{FieldValue, Filterable};

/// Lifecycle state of a todo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Open,
    Completed,
    Canceled,
}

impl Status {
    /// Returns the status as used in filters (`open`, `completed`, `canceled`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Completed => "completed",
            Status::Canceled => "canceled",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A todo item as read from the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier.
    pub id: String,

    /// Title of the todo.
    #[serde(alias = "title")]
    pub name: String,

    /// Free-form notes; empty when none were written.
    #[serde(default)]
    pub notes: String,

    /// Current status.
    #[serde(default)]
    pub status: Status,

    /// Due date, if one is set.
    #[serde(default, alias = "due", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Tag names, in display order.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Name of the containing project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Name of the containing area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    /// When the todo was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Todo {
    /// Creates an open todo with no dates, tags or container.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            notes: String::new(),
            status: Status::Open,
            due_date: None,
            tags: Vec::new(),
            project: None,
            area: None,
            created: None,
        }
    }

    /// Field names understood by [`Filterable::field_value`], without aliases.
    pub const FIELDS: [&'static str; 9] = [
        "id", "name", "notes", "status", "due", "tags", "project", "area", "created",
    ];
}

/// Exposes todo fields to filters.
///
/// | Field | Aliases | Type |
/// |---|---|---|
/// | `id` | | string |
/// | `name` | `title` | string |
/// | `notes` | | optional string (null when empty) |
/// | `status` | | string |
/// | `due` | `due_date`, `deadline` | optional date |
/// | `tags` | `tag` | string list |
/// | `project` | | optional string |
/// | `area` | | optional string |
/// | `created` | | optional date (UTC day) |
impl Filterable for Todo {
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        let value = match name.to_lowercase().as_str() {
            "id" => FieldValue::String(self.id.clone()),
            "name" | "title" => FieldValue::String(self.name.clone()),
            "notes" => {
                FieldValue::OptionalString(Some(self.notes.clone()).filter(|n| !n.is_empty()))
            }
            "status" => FieldValue::String(self.status.as_str().to_string()),
            "due" | "due_date" | "deadline" => FieldValue::OptionalDate(self.due_date),
            "tags" | "tag" => FieldValue::StringList(self.tags.clone()),
            "project" => FieldValue::OptionalString(self.project.clone()),
            "area" => FieldValue::OptionalString(self.area.clone()),
            "created" => FieldValue::OptionalDate(self.created.map(|c| c.date_naive())),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_new_defaults() {
        let todo = Todo::new("t1", "Write report");
        assert_eq!(todo.status, Status::Open);
        assert!(todo.due_date.is_none());
        assert!(todo.tags.is_empty());
    }

    #[test]
    fn test_field_lookup_is_case_insensitive() {
        let todo = Todo::new("t1", "Write report");
        assert_eq!(
            todo.field_value("NAME"),
            Some(FieldValue::String("Write report".to_string()))
        );
        assert_eq!(
            todo.field_value("Status"),
            Some(FieldValue::String("open".to_string()))
        );
    }

    #[test]
    fn test_field_aliases() {
        let mut todo = Todo::new("t1", "Write report");
        todo.due_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        todo.tags = vec!["work".to_string()];

        assert_eq!(todo.field_value("due"), todo.field_value("deadline"));
        assert_eq!(todo.field_value("due"), todo.field_value("due_date"));
        assert_eq!(todo.field_value("tags"), todo.field_value("tag"));
        assert_eq!(todo.field_value("title"), todo.field_value("name"));
    }

    #[test]
    fn test_unknown_field_is_none() {
        let todo = Todo::new("t1", "Write report");
        assert_eq!(todo.field_value("priority"), None);
        assert_eq!(todo.field_value(""), None);
    }

    #[test]
    fn test_every_listed_field_resolves() {
        let todo = Todo::new("t1", "Write report");
        for field in Todo::FIELDS {
            assert!(todo.field_value(field).is_some(), "field {field} missing");
        }
    }

    #[test]
    fn test_empty_notes_are_null() {
        let mut todo = Todo::new("t1", "Write report");
        assert!(todo.field_value("notes").unwrap().is_null());

        todo.notes = "draft in docs".to_string();
        assert!(!todo.field_value("notes").unwrap().is_null());
    }

    #[test]
    fn test_missing_optionals_are_null() {
        let todo = Todo::new("t1", "Write report");
        assert!(todo.field_value("due").unwrap().is_null());
        assert!(todo.field_value("project").unwrap().is_null());
        assert!(todo.field_value("area").unwrap().is_null());
        assert!(todo.field_value("created").unwrap().is_null());
        assert!(!todo.field_value("tags").unwrap().is_null());
    }

    #[test]
    fn test_created_uses_utc_day() {
        let mut todo = Todo::new("t1", "Write report");
        todo.created = Some("2025-01-25T23:30:00Z".parse().unwrap());
        assert_eq!(
            todo.field_value("created"),
            Some(FieldValue::OptionalDate(NaiveDate::from_ymd_opt(2025, 1, 25)))
        );
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{"id": "t1", "name": "Buy milk"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo, Todo::new("t1", "Buy milk"));
    }

    #[test]
    fn test_deserialize_with_aliases() {
        let json = r#"{
            "id": "t2",
            "title": "Ship release",
            "status": "canceled",
            "due": "2025-02-01",
            "tags": ["Work", "urgent"],
            "project": "Launch"
        }"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.name, "Ship release");
        assert_eq!(todo.status, Status::Canceled);
        assert_eq!(todo.due_date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(todo.project.as_deref(), Some("Launch"));
    }

    #[test]
    fn test_serialize_skips_none_values() {
        let json = serde_json::to_string(&Todo::new("t1", "Buy milk")).unwrap();
        assert!(!json.contains("due_date"));
        assert!(!json.contains("project"));
        assert!(json.contains(r#""status":"open""#));
    }
}
