//! Domain models for the Todoist CLI
//!
//! Contains the core logic without any I/O concerns.

mod filter;
mod hierarchy;
mod project;
mod task;

pub use filter::{Flag, FilterFlags, OVERDUE_FILTER, TODAY_FILTER};
pub use hierarchy::{Entry, TaskForest, TaskNode};
pub use project::{find_project, Comment, Label, LookupError, Project, Section};
pub use task::{parse_priority, priority_label, CompletedTask, Due, PriorityError, Task};
