//! Task domain model
//!
//! Tasks are returned by the API as a flat list. Hierarchy is expressed
//! through `parent_id`, sibling position through `child_order`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PriorityError {
    #[error("Invalid priority '{0}': expected p1-p4 or 1-4")]
    Invalid(String),
}

/// Due date attached to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Due {
    /// Calendar date (`YYYY-MM-DD`)
    pub date: String,

    /// Human-readable due string as typed by the user ("every monday")
    #[serde(default)]
    pub string: String,

    #[serde(default)]
    pub is_recurring: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Due {
    /// Returns the text shown next to a task, preferring the human string
    pub fn display(&self) -> &str {
        if self.string.is_empty() {
            &self.date
        } else {
            &self.string
        }
    }
}

/// An active task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Task {
    pub id: String,

    pub content: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub project_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Position among siblings sharing the same parent
    #[serde(rename = "child_order", alias = "order", default)]
    pub order: i64,

    /// API priority: 4 is the most urgent, 1 is the default
    #[serde(default = "default_priority")]
    pub priority: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<Due>,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub checked: bool,
}

fn default_priority() -> u8 {
    1
}

impl Task {
    /// Creates a task with the given ID and content
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            priority: default_priority(),
            ..Default::default()
        }
    }

    /// Sets the parent (builder style, mostly for tests)
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Sets the sibling order (builder style, mostly for tests)
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Returns the parent ID, treating an empty string as no parent
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|p| !p.is_empty())
    }

    /// Returns the user-facing priority label (`p1` is most urgent)
    pub fn priority_label(&self) -> Option<&'static str> {
        priority_label(self.priority)
    }

    /// Case-insensitive match against content and description
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.content.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// Maps an API priority to its display label; the default priority has none
pub fn priority_label(priority: u8) -> Option<&'static str> {
    match priority {
        4 => Some("p1"),
        3 => Some("p2"),
        2 => Some("p3"),
        _ => None,
    }
}

/// Parses a user priority (`p1`..`p4` or `1`..`4`) into the API value
pub fn parse_priority(input: &str) -> Result<u8, PriorityError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix('p')
        .or_else(|| trimmed.strip_prefix('P'))
        .unwrap_or(trimmed);

    match digits.parse::<u8>() {
        Ok(n @ 1..=4) => Ok(5 - n),
        _ => Err(PriorityError::Invalid(input.to_string())),
    }
}

/// A task returned by the completed-tasks endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CompletedTask {
    #[serde(alias = "task_id")]
    pub id: String,

    pub content: String,

    #[serde(default)]
    pub project_id: String,

    /// RFC 3339 completion timestamp
    #[serde(default)]
    pub completed_at: String,
}

impl CompletedTask {
    /// Returns the `YYYY-MM-DD` portion of the completion timestamp
    pub fn completed_date(&self) -> &str {
        self.completed_at.get(..10).unwrap_or(&self.completed_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_api_task() {
        let json = r#"{
            "id": "6X7rM8997g3RQmvh",
            "content": "Buy milk",
            "description": "",
            "project_id": "6Jf8VQXxpwv56VQ7",
            "parent_id": null,
            "child_order": 3,
            "priority": 4,
            "due": {"date": "2026-10-19", "string": "today", "is_recurring": false},
            "labels": ["errand"],
            "checked": false
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "6X7rM8997g3RQmvh");
        assert_eq!(task.order, 3);
        assert_eq!(task.parent(), None);
        assert_eq!(task.priority_label(), Some("p1"));
        assert_eq!(task.due.as_ref().map(Due::display), Some("today"));
        assert_eq!(task.labels, vec!["errand"]);
    }

    #[test]
    fn legacy_order_field_accepted() {
        let json = r#"{"id": "1", "content": "x", "order": 7}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.order, 7);
        assert_eq!(task.priority, 1);
    }

    #[test]
    fn empty_parent_is_root() {
        let task = Task::new("1", "x").with_parent("");
        assert_eq!(task.parent(), None);

        let task = Task::new("2", "y").with_parent("1");
        assert_eq!(task.parent(), Some("1"));
    }

    #[test]
    fn due_display_falls_back_to_date() {
        let due = Due {
            date: "2026-10-20".to_string(),
            ..Default::default()
        };
        assert_eq!(due.display(), "2026-10-20");
    }

    #[test]
    fn priority_labels() {
        assert_eq!(priority_label(4), Some("p1"));
        assert_eq!(priority_label(3), Some("p2"));
        assert_eq!(priority_label(2), Some("p3"));
        assert_eq!(priority_label(1), None);
    }

    #[test]
    fn parse_priority_values() {
        assert_eq!(parse_priority("p1"), Ok(4));
        assert_eq!(parse_priority("P2"), Ok(3));
        assert_eq!(parse_priority("3"), Ok(2));
        assert_eq!(parse_priority("4"), Ok(1));
        assert!(parse_priority("p5").is_err());
        assert!(parse_priority("urgent").is_err());
    }

    #[test]
    fn text_match_is_case_insensitive() {
        let mut task = Task::new("1", "Write Quarterly Report");
        task.description = "Include the SALES numbers".to_string();

        assert!(task.matches_text("quarterly"));
        assert!(task.matches_text("sales"));
        assert!(!task.matches_text("budget"));
    }

    #[test]
    fn completed_date_truncates_timestamp() {
        let task = CompletedTask {
            id: "1".to_string(),
            content: "Done".to_string(),
            completed_at: "2026-10-18T09:12:00.000000Z".to_string(),
            ..Default::default()
        };
        assert_eq!(task.completed_date(), "2026-10-18");

        let short = CompletedTask {
            completed_at: "2026".to_string(),
            ..Default::default()
        };
        assert_eq!(short.completed_date(), "2026");
    }
}
