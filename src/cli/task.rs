//! Task CLI commands

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use clap::Args;

use super::output::Output;
use super::render;
use crate::api::{Client, CompletedQuery, NewTask, TaskMove, TaskSource, TaskUpdate};
use crate::domain::{parse_priority, Comment, FilterFlags, Flag, Task};

/// Arguments for listing tasks
#[derive(Args, Debug, Default)]
#[command(after_help = "Examples:
  todoist tasks                    # Today's tasks (default)
  todoist tasks --all              # All active tasks
  todoist tasks --filter \"p1\"      # High priority
  todoist tasks -p Work            # Tasks in Work project
  todoist tasks --overdue          # Shortcut for overdue filter")]
pub struct ListArgs {
    /// Show today's tasks, including overdue
    #[arg(
        short = 't',
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub today: Option<bool>,

    /// Todoist filter query, sent as-is
    #[arg(short = 'f', long)]
    pub filter: Option<String>,

    /// Filter by project name
    #[arg(short = 'p', long)]
    pub project: Option<String>,

    /// Show only overdue tasks
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub overdue: Option<bool>,

    /// Show all active tasks
    #[arg(
        short = 'a',
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub all: Option<bool>,

    /// Show task descriptions and comments
    #[arg(long)]
    pub details: bool,
}

impl ListArgs {
    /// Converts parsed arguments into resolver input
    pub fn filter_flags(&self) -> FilterFlags {
        FilterFlags {
            filter: self.filter.clone().unwrap_or_default(),
            today: Flag::from_arg(self.today, true),
            overdue: Flag::from_arg(self.overdue, false),
            all: Flag::from_arg(self.all, false),
            project: self.project.clone(),
        }
    }
}

/// Arguments for creating a task
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task content
    #[arg(required = true, num_args = 1..)]
    pub content: Vec<String>,

    /// Project name
    #[arg(short = 'p', long)]
    pub project: Option<String>,

    /// Due date in natural language ("tomorrow", "every friday")
    #[arg(short = 'd', long)]
    pub due: Option<String>,

    /// Priority, p1 (urgent) to p4
    #[arg(short = 'P', long, value_parser = parse_priority)]
    pub priority: Option<u8>,

    /// Label (repeatable)
    #[arg(short = 'l', long = "label")]
    pub labels: Vec<String>,

    /// Task description
    #[arg(long)]
    pub description: Option<String>,

    /// Parent task ID
    #[arg(long)]
    pub parent: Option<String>,

    /// Section ID
    #[arg(long)]
    pub section: Option<String>,
}

/// Arguments for updating a task
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Task ID
    pub id: String,

    /// New content
    #[arg(long)]
    pub content: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New due date in natural language
    #[arg(short = 'd', long)]
    pub due: Option<String>,

    /// New priority, p1 (urgent) to p4
    #[arg(short = 'P', long, value_parser = parse_priority)]
    pub priority: Option<u8>,

    /// Replace labels (repeatable)
    #[arg(short = 'l', long = "label")]
    pub labels: Vec<String>,
}

impl UpdateArgs {
    fn to_update(&self) -> TaskUpdate {
        TaskUpdate {
            content: self.content.clone(),
            description: self.description.clone(),
            due_string: self.due.clone(),
            priority: self.priority,
            labels: (!self.labels.is_empty()).then(|| self.labels.clone()),
        }
    }
}

/// Arguments for moving a task
#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Task ID
    pub id: String,

    /// Destination project name
    #[arg(short = 'p', long)]
    pub project: Option<String>,

    /// Destination section ID
    #[arg(long)]
    pub section: Option<String>,

    /// Destination parent task ID
    #[arg(long)]
    pub parent: Option<String>,
}

/// Arguments for listing completed tasks
#[derive(Args, Debug)]
pub struct CompletedArgs {
    /// Look back this many days
    #[arg(long, default_value = "7")]
    pub days: u32,

    /// Filter by project name
    #[arg(short = 'p', long)]
    pub project: Option<String>,

    /// Maximum number of tasks
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Resolves the project (if any) and filter, then fetches tasks
pub fn fetch_tasks(
    source: &dyn TaskSource,
    output: &Output,
    flags: &FilterFlags,
) -> Result<Vec<Task>> {
    let project_id = match flags.project.as_deref().filter(|p| !p.is_empty()) {
        Some(name) => {
            let project = source.find_project(name)?;
            output.verbose_ctx("tasks", &format!("Project '{}' resolved to {}", name, project.id));
            Some(project.id)
        }
        None => None,
    };

    let filter = flags.resolve();
    output.verbose_ctx(
        "tasks",
        &format!("Fetching tasks: filter={:?}, project_id={:?}", filter, project_id),
    );

    let filter = (!filter.is_empty()).then_some(filter.as_str());
    let tasks = source.get_tasks(project_id.as_deref(), filter)?;
    output.verbose_ctx("tasks", &format!("Fetched {} tasks", tasks.len()));

    Ok(tasks)
}

/// Fetches comments for every task; any failure aborts before rendering
pub fn fetch_comments(
    source: &dyn TaskSource,
    tasks: &[Task],
) -> Result<HashMap<String, Vec<Comment>>> {
    let mut comments = HashMap::new();
    for task in tasks {
        comments.insert(task.id.clone(), source.get_comments(&task.id)?);
    }
    Ok(comments)
}

pub fn list_tasks(source: &dyn TaskSource, output: &Output, args: &ListArgs) -> Result<()> {
    let tasks = fetch_tasks(source, output, &args.filter_flags())?;

    if args.details && !output.is_json() {
        let comments = fetch_comments(source, &tasks)?;
        return Output::text(|w| render::write_tasks_detailed(w, &tasks, &comments));
    }

    output.tasks(&tasks)
}

/// Resolves an optional project name to its ID
fn project_id(client: &Client, output: &Output, name: Option<&str>) -> Result<Option<String>> {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => {
            let project = client.find_project(name)?;
            output.verbose(&format!("Project '{}' resolved to {}", name, project.id));
            Ok(Some(project.id))
        }
        None => Ok(None),
    }
}

pub fn add_task(client: &Client, output: &Output, args: AddArgs) -> Result<()> {
    let body = NewTask {
        content: args.content.join(" "),
        description: args.description,
        project_id: project_id(client, output, args.project.as_deref())?,
        section_id: args.section,
        parent_id: args.parent,
        due_string: args.due,
        priority: args.priority,
        labels: args.labels,
    };

    output.verbose_ctx("add", &format!("Creating task: {:?}", body.content));
    let task = client.add_task(&body)?;

    if !output.is_json() {
        println!("Created task:");
    }
    output.task(&task)
}

pub fn complete_tasks(client: &Client, output: &Output, ids: &[String]) -> Result<()> {
    for id in ids {
        output.verbose_ctx("complete", &format!("Closing task {}", id));
        client.close_task(id)?;
    }
    output.success(&format!("Completed: {}", ids.join(", ")));
    Ok(())
}

pub fn reopen_task(client: &Client, output: &Output, id: &str) -> Result<()> {
    client.reopen_task(id)?;
    output.success(&format!("Reopened: {}", id));
    Ok(())
}

pub fn delete_task(client: &Client, output: &Output, id: &str) -> Result<()> {
    client.delete_task(id)?;
    output.success(&format!("Deleted: {}", id));
    Ok(())
}

pub fn update_task(client: &Client, output: &Output, args: &UpdateArgs) -> Result<()> {
    let update = args.to_update();
    if update.is_empty() {
        anyhow::bail!(
            "Nothing to update: pass at least one of \
             --content, --description, --due, --priority, --label"
        );
    }

    let task = client.update_task(&args.id, &update)?;

    if !output.is_json() {
        println!("Updated task:");
    }
    output.task(&task)
}

pub fn move_task(client: &Client, output: &Output, args: &MoveArgs) -> Result<()> {
    let destination = TaskMove {
        project_id: project_id(client, output, args.project.as_deref())?,
        section_id: args.section.clone(),
        parent_id: args.parent.clone(),
    };

    if destination.destinations() != 1 {
        anyhow::bail!("Specify exactly one destination: --project, --section or --parent");
    }

    let task = client.move_task(&args.id, &destination)?;

    if output.is_json() {
        output.data(&task);
    } else {
        output.success(&format!("Moved: {}", task.id));
    }
    Ok(())
}

pub fn view_task(client: &Client, output: &Output, id: &str) -> Result<()> {
    let task = client.get_task(id)?;
    let comments = client.get_comments(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "task": task,
            "comments": comments,
        }));
        return Ok(());
    }

    Output::text(|w| render::write_task_detailed(w, &task, &comments))
}

/// Keeps tasks whose content or description contains the query
pub fn search_tasks(tasks: Vec<Task>, query: &str) -> Vec<Task> {
    tasks.into_iter().filter(|t| t.matches_text(query)).collect()
}

pub fn search(
    source: &dyn TaskSource,
    output: &Output,
    query: &str,
    project: Option<String>,
) -> Result<()> {
    let flags = FilterFlags {
        all: Flag::set(true),
        project,
        ..FilterFlags::default()
    };

    let tasks = fetch_tasks(source, output, &flags)?;
    let matches = search_tasks(tasks, query);
    output.verbose_ctx("search", &format!("{} tasks match {:?}", matches.len(), query));

    output.tasks(&matches)
}

/// Returns the start of a window reaching `days` back from `until`
fn window_start(until: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>> {
    Duration::try_days(i64::from(days))
        .and_then(|span| until.checked_sub_signed(span))
        .ok_or_else(|| anyhow::anyhow!("--days {} is out of range", days))
}

pub fn completed(client: &Client, output: &Output, args: &CompletedArgs) -> Result<()> {
    let until = Utc::now();
    let since = window_start(until, args.days)?;

    let query = CompletedQuery {
        since: since.to_rfc3339_opts(SecondsFormat::Secs, true),
        until: until.to_rfc3339_opts(SecondsFormat::Secs, true),
        project_id: project_id(client, output, args.project.as_deref())?,
        limit: args.limit,
    };

    output.verbose_ctx(
        "completed",
        &format!("Fetching completed tasks since {}", query.since),
    );
    let tasks = client.get_completed(&query)?;
    output.completed(&tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::api::ApiError;
    use crate::domain::{find_project, Project};
    use crate::storage::OutputFormat;

    /// In-memory task source recording the requests it receives
    #[derive(Default)]
    struct FakeSource {
        projects: Vec<Project>,
        tasks: Vec<Task>,
        requests: RefCell<Vec<(Option<String>, Option<String>)>>,
        comment_requests: RefCell<Vec<String>>,
        fail_comments_for: Option<String>,
    }

    impl TaskSource for FakeSource {
        fn find_project(&self, name: &str) -> Result<Project, ApiError> {
            Ok(find_project(&self.projects, name)?.clone())
        }

        fn get_tasks(
            &self,
            project_id: Option<&str>,
            filter: Option<&str>,
        ) -> Result<Vec<Task>, ApiError> {
            self.requests
                .borrow_mut()
                .push((project_id.map(String::from), filter.map(String::from)));
            Ok(self.tasks.clone())
        }

        fn get_comments(&self, task_id: &str) -> Result<Vec<Comment>, ApiError> {
            self.comment_requests.borrow_mut().push(task_id.to_string());
            if self.fail_comments_for.as_deref() == Some(task_id) {
                return Err(ApiError::TaskNotFound(task_id.to_string()));
            }
            Ok(vec![])
        }
    }

    fn req(project: Option<&str>, filter: Option<&str>) -> (Option<String>, Option<String>) {
        (project.map(String::from), filter.map(String::from))
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Text, false)
    }

    fn source() -> FakeSource {
        FakeSource {
            projects: vec![Project::new("p1", "Work"), Project::new("p2", "Home")],
            tasks: vec![Task::new("1", "Write report"), Task::new("2", "Water plants")],
            ..Default::default()
        }
    }

    #[test]
    fn default_listing_requests_today() {
        let source = source();
        fetch_tasks(&source, &quiet(), &ListArgs::default().filter_flags()).unwrap();

        assert_eq!(*source.requests.borrow(), vec![req(None, Some("today | overdue"))]);
    }

    #[test]
    fn project_listing_requests_everything_in_project() {
        let source = source();
        let args = ListArgs {
            project: Some("work".to_string()),
            ..Default::default()
        };
        fetch_tasks(&source, &quiet(), &args.filter_flags()).unwrap();

        assert_eq!(*source.requests.borrow(), vec![req(Some("p1"), None)]);
    }

    #[test]
    fn project_with_explicit_today() {
        let source = source();
        let args = ListArgs {
            project: Some("Home".to_string()),
            today: Some(true),
            ..Default::default()
        };
        fetch_tasks(&source, &quiet(), &args.filter_flags()).unwrap();

        assert_eq!(
            *source.requests.borrow(),
            vec![req(Some("p2"), Some("today | overdue"))]
        );
    }

    #[test]
    fn unknown_project_aborts_before_fetching() {
        let source = source();
        let args = ListArgs {
            project: Some("Garden".to_string()),
            ..Default::default()
        };

        let err = fetch_tasks(&source, &quiet(), &args.filter_flags()).unwrap_err();
        assert_eq!(err.to_string(), "Project not found: Garden");
        assert!(source.requests.borrow().is_empty());
    }

    #[test]
    fn explicit_filter_passed_through() {
        let source = source();
        let args = ListArgs {
            filter: Some("p1 & @work".to_string()),
            overdue: Some(true),
            ..Default::default()
        };
        fetch_tasks(&source, &quiet(), &args.filter_flags()).unwrap();

        assert_eq!(*source.requests.borrow(), vec![req(None, Some("p1 & @work"))]);
    }

    #[test]
    fn comments_fetched_for_every_task() {
        let source = source();
        let comments = fetch_comments(&source, &source.tasks).unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(source.comment_requests.borrow().as_slice(), &["1", "2"]);
    }

    #[test]
    fn comment_failure_aborts() {
        let source = FakeSource {
            fail_comments_for: Some("1".to_string()),
            ..source()
        };

        assert!(fetch_comments(&source, &source.tasks).is_err());
        assert_eq!(source.comment_requests.borrow().as_slice(), &["1"]);
    }

    #[test]
    fn search_matches_content_and_description() {
        let mut plants = Task::new("2", "Water plants");
        plants.description = "Also the REPORT cactus".to_string();
        let tasks = vec![Task::new("1", "Write report"), plants, Task::new("3", "Call mom")];

        let ids: Vec<_> = search_tasks(tasks, "report").into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn completed_window() {
        let until = DateTime::parse_from_rfc3339("2026-10-19T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let since = window_start(until, 7).unwrap();
        assert_eq!(since.to_rfc3339_opts(SecondsFormat::Secs, true), "2026-10-12T12:00:00Z");

        let err = window_start(until, u32::MAX).unwrap_err();
        assert_eq!(err.to_string(), format!("--days {} is out of range", u32::MAX));
    }

    #[test]
    fn update_requires_a_change() {
        let args = UpdateArgs {
            id: "1".to_string(),
            content: None,
            description: None,
            due: None,
            priority: None,
            labels: vec![],
        };
        assert!(args.to_update().is_empty());

        let args = UpdateArgs {
            priority: Some(4),
            ..args
        };
        assert_eq!(args.to_update().priority, Some(4));
    }
}
