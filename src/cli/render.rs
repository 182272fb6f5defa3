//! Human-readable rendering
//!
//! Task lists are printed as a tree: each subtask is indented two spaces
//! per level below its parent.

use std::collections::HashMap;
use std::io::{self, Write};

use colored::Colorize;

use crate::domain::{Comment, CompletedTask, Label, Project, Section, Task, TaskForest};

const INDENT: &str = "  ";
const DETAIL_INDENT: &str = "    ";

fn priority_marker(task: &Task) -> Option<String> {
    let label = task.priority_label()?;
    let marker = format!("[{}]", label);
    Some(match task.priority {
        4 => marker.red().to_string(),
        3 => marker.yellow().to_string(),
        _ => marker.blue().to_string(),
    })
}

/// Formats priority, content, due date and labels
pub fn format_task(task: &Task) -> String {
    let mut parts = Vec::new();

    if let Some(marker) = priority_marker(task) {
        parts.push(marker);
    }

    parts.push(task.content.clone());

    if let Some(due) = &task.due {
        parts.push(format!("({})", due.display()).bright_black().to_string());
    }

    if !task.labels.is_empty() {
        parts.push(format!("@{}", task.labels.join(" @")).cyan().to_string());
    }

    parts.join(" ")
}

/// Formats a task as a single line prefixed with its ID
pub fn format_task_line(task: &Task) -> String {
    format!("{}  {}", task.id.bright_black(), format_task(task))
}

/// Writes tasks as an indented tree
pub fn write_tasks(w: &mut dyn Write, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(w, "No tasks found.");
    }

    for entry in TaskForest::build(tasks).flatten() {
        writeln!(w, "{}{}", INDENT.repeat(entry.depth), format_task_line(entry.task))?;
    }

    Ok(())
}

/// Writes tasks as a tree with descriptions and comments under each one
///
/// Detail lines use a fixed indent regardless of the task's depth.
pub fn write_tasks_detailed(
    w: &mut dyn Write,
    tasks: &[Task],
    comments: &HashMap<String, Vec<Comment>>,
) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(w, "No tasks found.");
    }

    let entries = TaskForest::build(tasks).flatten();
    for (i, entry) in entries.iter().enumerate() {
        writeln!(w, "{}{}", INDENT.repeat(entry.depth), format_task_line(entry.task))?;
        write_details(w, entry.task, comments.get(&entry.task.id).map(Vec::as_slice))?;

        if i + 1 < entries.len() {
            writeln!(w)?;
        }
    }

    Ok(())
}

fn write_details(w: &mut dyn Write, task: &Task, comments: Option<&[Comment]>) -> io::Result<()> {
    if !task.description.is_empty() {
        writeln!(w, "{}{}", DETAIL_INDENT, task.description.bright_black())?;
    }

    if let Some(comments) = comments.filter(|c| !c.is_empty()) {
        writeln!(w, "{}Comments ({}):", DETAIL_INDENT, comments.len())?;
        for comment in comments {
            writeln!(
                w,
                "{}{}[{}] {}",
                DETAIL_INDENT,
                INDENT,
                comment.posted_date(),
                comment.content
            )?;
        }
    }

    Ok(())
}

/// Writes one task with its description
pub fn write_task(w: &mut dyn Write, task: &Task) -> io::Result<()> {
    writeln!(w, "{}", format_task_line(task))?;
    write_details(w, task, None)
}

/// Writes one task with its description and comments
pub fn write_task_detailed(w: &mut dyn Write, task: &Task, comments: &[Comment]) -> io::Result<()> {
    writeln!(w, "{}", format_task_line(task))?;
    write_details(w, task, Some(comments))
}

/// Formats a project name with favourite/inbox markers
pub fn format_project(project: &Project) -> String {
    let mut markers = Vec::new();
    if project.is_favorite {
        markers.push("*");
    }
    if project.inbox_project {
        markers.push("inbox");
    }

    if markers.is_empty() {
        project.name.clone()
    } else {
        format!(
            "{} {}",
            project.name,
            format!("[{}]", markers.join(", ")).bright_black()
        )
    }
}

pub fn write_projects(w: &mut dyn Write, projects: &[Project]) -> io::Result<()> {
    if projects.is_empty() {
        return writeln!(w, "No projects found.");
    }

    for project in projects {
        writeln!(w, "{}  {}", project.id.bright_black(), format_project(project))?;
    }
    Ok(())
}

pub fn write_labels(w: &mut dyn Write, labels: &[Label]) -> io::Result<()> {
    if labels.is_empty() {
        return writeln!(w, "No labels found.");
    }

    for label in labels {
        writeln!(
            w,
            "{}  {}",
            label.id.bright_black(),
            format!("@{}", label.name).cyan()
        )?;
    }
    Ok(())
}

pub fn write_sections(w: &mut dyn Write, sections: &[Section]) -> io::Result<()> {
    if sections.is_empty() {
        return writeln!(w, "No sections found.");
    }

    for section in sections {
        writeln!(w, "{}  {}", section.id.bright_black(), section.name)?;
    }
    Ok(())
}

pub fn write_comments(w: &mut dyn Write, comments: &[Comment]) -> io::Result<()> {
    if comments.is_empty() {
        return writeln!(w, "No comments found.");
    }

    for comment in comments {
        writeln!(w, "{}  {}", comment.posted_at.bright_black(), comment.content)?;
    }
    Ok(())
}

pub fn write_completed(w: &mut dyn Write, tasks: &[CompletedTask]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(w, "No completed tasks found.");
    }

    for task in tasks {
        writeln!(
            w,
            "{}  {}",
            task.completed_date().bright_black(),
            task.content.strikethrough()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Due;

    fn plain() {
        colored::control::set_override(false);
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        plain();
        let mut buf = Vec::new();
        f(&mut buf as &mut dyn Write).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn task_line_format() {
        plain();
        let mut task = Task::new("42", "Ship release");
        task.priority = 4;
        task.due = Some(Due {
            date: "2026-10-20".to_string(),
            string: "tomorrow".to_string(),
            ..Default::default()
        });
        task.labels = vec!["work".to_string(), "urgent".to_string()];

        assert_eq!(
            format_task_line(&task),
            "42  [p1] Ship release (tomorrow) @work @urgent"
        );
    }

    #[test]
    fn task_line_without_extras() {
        plain();
        assert_eq!(format_task_line(&Task::new("7", "Read")), "7  Read");
    }

    #[test]
    fn hierarchy_indentation() {
        let tasks = vec![
            Task::new("1", "Parent").with_order(1),
            Task::new("2", "Child 1").with_parent("1").with_order(1),
            Task::new("3", "Child 2").with_parent("1").with_order(2),
            Task::new("4", "Grandchild").with_parent("2").with_order(1),
        ];

        let out = render(|w| write_tasks(w, &tasks));
        assert_eq!(
            out,
            "1  Parent\n  2  Child 1\n    4  Grandchild\n  3  Child 2\n"
        );
    }

    #[test]
    fn orphan_rendered_at_root() {
        let tasks = vec![Task::new("9", "Orphan").with_parent("gone")];
        let out = render(|w| write_tasks(w, &tasks));
        assert_eq!(out, "9  Orphan\n");
    }

    #[test]
    fn empty_tasks_message() {
        let out = render(|w| write_tasks(w, &[]));
        assert_eq!(out, "No tasks found.\n");
    }

    #[test]
    fn detailed_rendering() {
        let mut parent = Task::new("1", "Parent");
        parent.description = "Some notes".to_string();
        let tasks = vec![parent, Task::new("2", "Child").with_parent("1")];

        let mut comments = HashMap::new();
        comments.insert(
            "2".to_string(),
            vec![Comment {
                id: "c1".to_string(),
                task_id: "2".to_string(),
                content: "Looks good".to_string(),
                posted_at: "2026-10-18T10:00:00Z".to_string(),
            }],
        );

        let out = render(|w| write_tasks_detailed(w, &tasks, &comments));
        assert_eq!(
            out,
            "1  Parent\n    Some notes\n\n\
             \x20 2  Child\n    Comments (1):\n      [2026-10-18] Looks good\n"
        );
    }

    #[test]
    fn detailed_empty() {
        let out = render(|w| write_tasks_detailed(w, &[], &HashMap::new()));
        assert_eq!(out, "No tasks found.\n");
    }

    #[test]
    fn project_markers() {
        plain();
        let mut project = Project::new("1", "Inbox");
        project.inbox_project = true;
        project.is_favorite = true;
        assert_eq!(format_project(&project), "Inbox [*, inbox]");
        assert_eq!(format_project(&Project::new("2", "Work")), "Work");
    }

    #[test]
    fn empty_list_messages() {
        assert_eq!(render(|w| write_projects(w, &[])), "No projects found.\n");
        assert_eq!(render(|w| write_labels(w, &[])), "No labels found.\n");
        assert_eq!(render(|w| write_sections(w, &[])), "No sections found.\n");
        assert_eq!(render(|w| write_comments(w, &[])), "No comments found.\n");
        assert_eq!(render(|w| write_completed(w, &[])), "No completed tasks found.\n");
    }

    #[test]
    fn labels_and_completed() {
        let labels = vec![Label {
            id: "l1".to_string(),
            name: "home".to_string(),
            ..Default::default()
        }];
        assert_eq!(render(|w| write_labels(w, &labels)), "l1  @home\n");

        let done = vec![CompletedTask {
            id: "1".to_string(),
            content: "Taxes".to_string(),
            completed_at: "2026-04-15T12:00:00Z".to_string(),
            ..Default::default()
        }];
        assert_eq!(render(|w| write_completed(w, &done)), "2026-04-15  Taxes\n");
    }
}
