//! Comment commands

use anyhow::Result;

use super::output::Output;
use crate::api::{Client, TaskSource};

/// Adds a comment when text is given, otherwise lists the task's comments
pub fn run(client: &Client, output: &Output, task_id: &str, text: &[String]) -> Result<()> {
    let content = text.join(" ");

    if content.trim().is_empty() {
        let comments = client.get_comments(task_id)?;
        return output.comments(&comments);
    }

    let comment = client.add_comment(task_id, &content)?;

    if output.is_json() {
        output.data(&comment);
    } else {
        output.success(&format!("Comment added to {}", task_id));
    }
    Ok(())
}
