//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Tasks | List and edit tasks | `tasks`, `add`, `complete`, `update`, `move` |
//! | Lookup | Read-only views | `view`, `search`, `completed` |
//! | Organisation | Projects, sections, labels | `projects`, `sections`, `labels` |
//! | Comments | Task discussion | `comment` |
//! | Setup | Token storage | `auth` |
//!
//! ## Output Formats
//!
//! Text output is colorized and shows subtasks indented under their parent.
//! `--json` prints a single-line envelope instead:
//!
//! ```json
//! {"success":true,"data":[...]}
//! {"success":false,"error":"Project not found: Work"}
//! ```
//!
//! JSON task lists keep the order the API returned them in.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! todoist --verbose tasks -p Work
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod auth;
mod comment;
mod output;
mod project;
mod render;
mod task;

pub use app::{run, Cli, Commands};
pub use output::{Envelope, Output};
pub use render::{format_task, format_task_line, write_tasks, write_tasks_detailed};
