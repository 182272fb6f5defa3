//! Request bodies for write endpoints

use serde::Serialize;

/// Body for creating a task
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NewTask {
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Body for updating a task; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl TaskUpdate {
    /// Returns true if the update would change nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Body for moving a task; exactly one destination is expected
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TaskMove {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl TaskMove {
    /// Number of destinations set
    pub fn destinations(&self) -> usize {
        [&self.project_id, &self.section_id, &self.parent_id]
            .iter()
            .filter(|d| d.is_some())
            .count()
    }
}

/// Query for the completed-tasks endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedQuery {
    /// RFC 3339 lower bound
    pub since: String,

    /// RFC 3339 upper bound
    pub until: String,

    pub project_id: Option<String>,

    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_omits_unset_fields() {
        let body = NewTask {
            content: "Buy milk".to_string(),
            due_string: Some("tomorrow".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"content": "Buy milk", "due_string": "tomorrow"})
        );
    }

    #[test]
    fn empty_update() {
        assert!(TaskUpdate::default().is_empty());

        let update = TaskUpdate {
            labels: Some(vec![]),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({"labels": []}));
    }

    #[test]
    fn move_destinations() {
        assert_eq!(TaskMove::default().destinations(), 0);

        let body = TaskMove {
            project_id: Some("p".to_string()),
            parent_id: Some("t".to_string()),
            ..Default::default()
        };
        assert_eq!(body.destinations(), 2);
    }
}
