//! Main CLI application structure

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::Output;
use super::task::{AddArgs, CompletedArgs, ListArgs, MoveArgs, UpdateArgs};
use super::{auth, comment, project, task};
use crate::api::Client;
use crate::storage::{Config, OutputFormat};

#[derive(Parser)]
#[command(name = "todoist")]
#[command(author, version, about = "Todoist CLI - manage tasks from the command line")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Defaults to today's tasks when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store the API token
    Auth(auth::AuthArgs),

    /// List tasks
    #[command(visible_aliases = ["list", "ls"])]
    Tasks(ListArgs),

    /// Add a task
    Add(AddArgs),

    /// Complete tasks
    #[command(visible_alias = "done")]
    Complete {
        /// Task IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Reopen a completed task
    Reopen {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// Update a task
    Update(UpdateArgs),

    /// Move a task to another project, section or parent
    Move(MoveArgs),

    /// Show a task with its description and comments
    View {
        /// Task ID
        id: String,
    },

    /// Search active tasks by text
    Search {
        /// Text to look for in content and description
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Filter by project name
        #[arg(short = 'p', long)]
        project: Option<String>,
    },

    /// List recently completed tasks
    Completed(CompletedArgs),

    /// List or create projects
    Projects {
        #[command(subcommand)]
        command: Option<project::ProjectCommands>,
    },

    /// List labels
    Labels,

    /// List sections
    Sections {
        /// Filter by project name
        #[arg(short = 'p', long)]
        project: Option<String>,
    },

    /// List a task's comments, or add one
    Comment {
        /// Task ID
        task_id: String,

        /// Comment text (omit to list comments)
        text: Vec<String>,
    },
}

/// Main entry point for the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::load();

    let format = match (&config, cli.json) {
        (_, true) => OutputFormat::Json,
        (Ok(config), false) => config.default_format,
        (Err(_), false) => OutputFormat::Text,
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Todoist CLI starting");

    let result = match config {
        Ok(config) => dispatch(cli.command, &config, &output),
        // auth can repair a broken config
        Err(e) if matches!(cli.command, Some(Commands::Auth(_))) => {
            output.verbose(&format!("Ignoring unreadable config: {:#}", e));
            dispatch(cli.command, &Config::default(), &output)
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            output.verbose("Command completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Builds an authenticated client from configuration
fn client(config: &Config, output: &Output) -> Result<Client> {
    let (token, source) = config.token()?;
    let api_url = config.api_url();
    output.verbose(&format!(
        "Using API {} (token from {})",
        api_url,
        source.describe()
    ));
    Ok(Client::new(token, &api_url)?)
}

fn dispatch(command: Option<Commands>, config: &Config, output: &Output) -> Result<()> {
    let connect = || client(config, output);

    match command {
        None => task::list_tasks(&connect()?, output, &ListArgs::default()),
        Some(Commands::Auth(args)) => auth::run(args, config, output),
        Some(Commands::Tasks(args)) => task::list_tasks(&connect()?, output, &args),
        Some(Commands::Add(args)) => task::add_task(&connect()?, output, args),
        Some(Commands::Complete { ids }) => task::complete_tasks(&connect()?, output, &ids),
        Some(Commands::Reopen { id }) => task::reopen_task(&connect()?, output, &id),
        Some(Commands::Delete { id }) => task::delete_task(&connect()?, output, &id),
        Some(Commands::Update(args)) => task::update_task(&connect()?, output, &args),
        Some(Commands::Move(args)) => task::move_task(&connect()?, output, &args),
        Some(Commands::View { id }) => task::view_task(&connect()?, output, &id),
        Some(Commands::Search { query, project }) => {
            task::search(&connect()?, output, &query.join(" "), project)
        }
        Some(Commands::Completed(args)) => task::completed(&connect()?, output, &args),
        Some(Commands::Projects { command }) => project::run(command, &connect()?, output),
        Some(Commands::Labels) => project::list_labels(&connect()?, output),
        Some(Commands::Sections { project }) => {
            project::list_sections(&connect()?, output, project.as_deref())
        }
        Some(Commands::Comment { task_id, text }) => {
            comment::run(&connect()?, output, &task_id, &text)
        }
    }
}
