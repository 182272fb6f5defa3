//! Token management

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;

use super::output::Output;
use crate::storage::{Config, ConfigError};

#[derive(Args, Debug)]
pub struct AuthArgs {
    /// API token (read from stdin when omitted)
    pub token: Option<String>,

    /// Show whether a token is configured
    #[arg(long)]
    pub status: bool,
}

pub fn run(args: AuthArgs, config: &Config, output: &Output) -> Result<()> {
    if args.status {
        return status(config, output);
    }

    let token = match args.token {
        Some(token) => token,
        None => read_token(output)?,
    };
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Token must not be empty");
    }

    let updated = Config {
        token: Some(token.to_string()),
        ..config.clone()
    };
    let path = updated.save()?;

    output.verbose_ctx("auth", &format!("Wrote {}", path.display()));
    output.success(&format!("Token saved to {}", path.display()));
    Ok(())
}

fn read_token(output: &Output) -> Result<String> {
    if !output.is_json() {
        eprint!("Todoist API token: ");
        io::stderr().flush().ok();
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read token from stdin")?;
    Ok(line)
}

fn status(config: &Config, output: &Output) -> Result<()> {
    let source = match config.token() {
        Ok((_, source)) => Some(source),
        Err(ConfigError::MissingToken) => None,
        Err(e) => return Err(e.into()),
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "authenticated": source.is_some(),
            "source": source.as_ref().map(|s| s.describe()),
        }));
        return Ok(());
    }

    match source {
        Some(source) => println!("Authenticated (token from {})", source.describe()),
        None => println!("Not authenticated. Run 'todoist auth <token>'."),
    }
    Ok(())
}
