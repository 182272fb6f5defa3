//! API error type

use thiserror::Error;

use crate::domain::LookupError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("API request failed ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected API response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Turns a 404 from a task endpoint into [`ApiError::TaskNotFound`]
    pub fn for_task(self, task_id: &str) -> Self {
        match self {
            ApiError::Status { status: 404, .. } => ApiError::TaskNotFound(task_id.to_string()),
            other => other,
        }
    }
}
