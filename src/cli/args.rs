//! CLI argument definitions using clap
//!
//! Commands:
//! - nimbus-api serve [--config <path>] [--port <n>] [--data-file <path>] [--verbose]
//! - nimbus-api check [--config <path>] [--data-file <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nimbus-api - read-only HTTP API over experiment configurations
#[derive(Parser, Debug)]
#[command(name = "nimbus-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the experiment records and serve the HTTP API
    Serve {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Override the configured records file
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate the records file and print per-group counts
    Check {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured records file
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "nimbus-api",
            "serve",
            "--port",
            "9000",
            "--data-file",
            "fixtures.json",
            "-v",
        ])
        .unwrap();

        match cli.command {
            Command::Serve {
                config,
                port,
                data_file,
                verbose,
            } => {
                assert!(config.is_none());
                assert_eq!(port, Some(9000));
                assert_eq!(data_file, Some(PathBuf::from("fixtures.json")));
                assert!(verbose);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["nimbus-api", "check", "--config", "nimbus.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Check { config: Some(_), data_file: None }
        ));
    }
}
