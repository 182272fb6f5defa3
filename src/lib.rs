//! Todoist CLI - manage Todoist tasks from the command line
//!
//! Talks to the Todoist REST API with a stored token and prints results
//! either as colorized text, with subtasks nested under their parents, or
//! as a JSON envelope for scripting.

pub mod api;
pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{FilterFlags, Flag, Task, TaskForest};
