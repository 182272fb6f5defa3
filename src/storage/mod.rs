//! # Storage Layer
//!
//! The CLI keeps no task state locally. The only persisted data is the
//! user configuration holding the API token.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `<config dir>/config.toml` |
//!
//! ## Key Types
//!
//! - [`Config`] - Token, API URL and default output format

mod config;

pub use config::{
    Config, ConfigError, OutputFormat, TokenSource, API_URL_ENV, CONFIG_DIR_ENV, TOKEN_ENV,
};
