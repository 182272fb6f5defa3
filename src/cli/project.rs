//! Project, section and label commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::api::{Client, TaskSource};

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project
    Add {
        /// Project name
        name: String,
    },
}

pub fn run(cmd: Option<ProjectCommands>, client: &Client, output: &Output) -> Result<()> {
    match cmd {
        None => list_projects(client, output),
        Some(ProjectCommands::Add { name }) => add_project(client, output, &name),
    }
}

fn list_projects(client: &Client, output: &Output) -> Result<()> {
    let projects = client.get_projects()?;
    output.verbose_ctx("projects", &format!("Fetched {} projects", projects.len()));
    output.projects(&projects)
}

fn add_project(client: &Client, output: &Output, name: &str) -> Result<()> {
    let project = client.add_project(name)?;

    if output.is_json() {
        output.data(&project);
    } else {
        output.success(&format!("Created project: {} ({})", project.name, project.id));
    }
    Ok(())
}

pub fn list_labels(client: &Client, output: &Output) -> Result<()> {
    let labels = client.get_labels()?;
    output.labels(&labels)
}

pub fn list_sections(client: &Client, output: &Output, project: Option<&str>) -> Result<()> {
    let project_id = match project.filter(|p| !p.is_empty()) {
        Some(name) => Some(client.find_project(name)?.id),
        None => None,
    };

    output.verbose_ctx("sections", &format!("project_id={:?}", project_id));
    let sections = client.get_sections(project_id.as_deref())?;
    output.sections(&sections)
}
