//! Projects, sections, labels and comments
//!
//! Plain API records plus project name lookup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LookupError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Ambiguous project name '{name}': matches {}", .matches.join(", "))]
    AmbiguousProject { name: String, matches: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Project {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub is_favorite: bool,

    #[serde(default, alias = "is_inbox_project")]
    pub inbox_project: bool,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Finds a project by name
///
/// A case-insensitive exact match wins outright. Otherwise the name is matched
/// as a case-insensitive substring, which must identify exactly one project.
pub fn find_project<'a>(projects: &'a [Project], name: &str) -> Result<&'a Project, LookupError> {
    let needle = name.to_lowercase();

    let exact: Vec<&Project> = projects
        .iter()
        .filter(|p| p.name.to_lowercase() == needle)
        .collect();

    let candidates = if exact.is_empty() {
        projects
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    } else {
        exact
    };

    match candidates.as_slice() {
        [] => Err(LookupError::ProjectNotFound(name.to_string())),
        [project] => Ok(*project),
        many => Err(LookupError::AmbiguousProject {
            name: name.to_string(),
            matches: many.iter().map(|p| p.name.clone()).collect(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Section {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub project_id: String,

    #[serde(default, alias = "order")]
    pub section_order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Label {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Comment {
    pub id: String,

    #[serde(default, alias = "item_id")]
    pub task_id: String,

    pub content: String,

    /// RFC 3339 timestamp
    #[serde(default)]
    pub posted_at: String,
}

impl Comment {
    /// Returns the `YYYY-MM-DD` portion of the posting timestamp
    pub fn posted_date(&self) -> &str {
        self.posted_at.get(..10).unwrap_or(&self.posted_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects() -> Vec<Project> {
        vec![
            Project::new("1", "Inbox"),
            Project::new("2", "Work"),
            Project::new("3", "Work Archive"),
            Project::new("4", "Personal"),
            Project::new("5", "Personal Finance"),
        ]
    }

    #[test]
    fn exact_match_case_insensitive() {
        let projects = projects();
        assert_eq!(find_project(&projects, "work").unwrap().id, "2");
    }

    #[test]
    fn exact_match_beats_substring() {
        let projects = projects();
        assert_eq!(find_project(&projects, "Personal").unwrap().id, "4");
    }

    #[test]
    fn unique_substring_match() {
        let projects = projects();
        assert_eq!(find_project(&projects, "finance").unwrap().id, "5");
    }

    #[test]
    fn not_found() {
        let projects = projects();
        assert_eq!(
            find_project(&projects, "Garden"),
            Err(LookupError::ProjectNotFound("Garden".to_string()))
        );
    }

    #[test]
    fn ambiguous_substring() {
        let projects = projects();
        let err = find_project(&projects, "o").unwrap_err();
        assert!(matches!(err, LookupError::AmbiguousProject { .. }));
        assert!(err.to_string().contains("Inbox"));
    }

    #[test]
    fn duplicate_exact_names_are_ambiguous() {
        let projects = vec![Project::new("1", "Work"), Project::new("2", "work")];
        let err = find_project(&projects, "Work").unwrap_err();
        assert_eq!(
            err,
            LookupError::AmbiguousProject {
                name: "Work".to_string(),
                matches: vec!["Work".to_string(), "work".to_string()],
            }
        );
    }

    #[test]
    fn comment_date() {
        let comment = Comment {
            posted_at: "2026-10-19T08:00:00Z".to_string(),
            ..Default::default()
        };
        assert_eq!(comment.posted_date(), "2026-10-19");
    }

    #[test]
    fn inbox_alias() {
        let json = r#"{"id": "1", "name": "Inbox", "is_inbox_project": true}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.inbox_project);
    }
}
