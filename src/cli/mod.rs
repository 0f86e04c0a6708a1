//! CLI module for nimbus-api
//!
//! Provides command-line interface for:
//! - serve: Load records and serve the HTTP API
//! - check: Validate a records file and report per-group counts

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, load_store, resolve_config, run, run_command, serve, CheckSummary};
pub use errors::{CliError, CliErrorCode, CliResult};
