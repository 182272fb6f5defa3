//! Output formatting for CLI commands
//!
//! JSON mode wraps every result in an [`Envelope`]. Text mode goes through
//! the renderers in [`super::render`].

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use super::render;
use crate::domain::{Comment, CompletedTask, Label, Project, Section, Task};
use crate::storage::OutputFormat;

/// JSON wrapper for every machine-readable response
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a, T: Serialize> Envelope<'a, T> {
    pub fn ok(data: &'a T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl<'a> Envelope<'a, ()> {
    pub fn failure(error: &'a str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                self.json_line(&Envelope::ok(&serde_json::json!({ "message": message })));
            }
        }
    }

    /// Prints an error message to stderr
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("Error: {}", message),
            OutputFormat::Json => match serde_json::to_string(&Envelope::failure(message)) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", message),
            },
        }
    }

    /// Prints structured data inside a success envelope
    pub fn data<T: Serialize>(&self, data: &T) {
        self.json_line(&Envelope::ok(data));
    }

    fn json_line<T: Serialize>(&self, envelope: &Envelope<'_, T>) {
        if let Ok(json) = serde_json::to_string(envelope) {
            println!("{}", json);
        }
    }

    /// Prints a task list: flat input order as JSON, hierarchy as text
    pub fn tasks(&self, tasks: &[Task]) -> Result<()> {
        if self.is_json() {
            self.data(&tasks);
            return Ok(());
        }
        Self::text(|w| render::write_tasks(w, tasks))
    }

    /// Prints a single task
    pub fn task(&self, task: &Task) -> Result<()> {
        if self.is_json() {
            self.data(task);
            return Ok(());
        }
        Self::text(|w| render::write_task(w, task))
    }

    pub fn projects(&self, projects: &[Project]) -> Result<()> {
        if self.is_json() {
            self.data(&projects);
            return Ok(());
        }
        Self::text(|w| render::write_projects(w, projects))
    }

    pub fn labels(&self, labels: &[Label]) -> Result<()> {
        if self.is_json() {
            self.data(&labels);
            return Ok(());
        }
        Self::text(|w| render::write_labels(w, labels))
    }

    pub fn sections(&self, sections: &[Section]) -> Result<()> {
        if self.is_json() {
            self.data(&sections);
            return Ok(());
        }
        Self::text(|w| render::write_sections(w, sections))
    }

    pub fn comments(&self, comments: &[Comment]) -> Result<()> {
        if self.is_json() {
            self.data(&comments);
            return Ok(());
        }
        Self::text(|w| render::write_comments(w, comments))
    }

    pub fn completed(&self, tasks: &[CompletedTask]) -> Result<()> {
        if self.is_json() {
            self.data(&tasks);
            return Ok(());
        }
        Self::text(|w| render::write_completed(w, tasks))
    }

    /// Runs a text renderer against locked stdout
    pub fn text<F>(render: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        render(&mut lock as &mut dyn Write)?;
        lock.flush()?;
        Ok(())
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
