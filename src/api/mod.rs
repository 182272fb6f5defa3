//! # API Layer
//!
//! Thin blocking client for the Todoist REST API.
//!
//! ## Endpoints
//!
//! | Resource | Operations |
//! |----------|------------|
//! | Tasks | list, filter, get, add, update, close, reopen, move, delete |
//! | Completed tasks | list by completion date |
//! | Projects | list, add |
//! | Sections, labels | list |
//! | Comments | list, add |
//!
//! List endpoints are cursor-paginated; [`Client`] follows `next_cursor`
//! until the server stops returning one.
//!
//! Task listing goes through the [`TaskSource`] trait so rendering and
//! filtering can run against an in-memory source.

mod client;
mod error;
mod request;

pub use client::{Client, DEFAULT_API_URL};
pub use error::ApiError;
pub use request::{CompletedQuery, NewTask, TaskMove, TaskUpdate};

use crate::domain::{Comment, Project, Task};

/// Read access needed to list tasks
pub trait TaskSource {
    /// Finds a project by name
    fn find_project(&self, name: &str) -> Result<Project, ApiError>;

    /// Fetches active tasks, optionally scoped to a project and a filter query
    fn get_tasks(
        &self,
        project_id: Option<&str>,
        filter: Option<&str>,
    ) -> Result<Vec<Task>, ApiError>;

    /// Fetches every comment on a task
    fn get_comments(&self, task_id: &str) -> Result<Vec<Comment>, ApiError>;
}
