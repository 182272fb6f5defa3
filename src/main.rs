//! Todoist CLI - manage tasks from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    todoist_cli::cli::run()
}
