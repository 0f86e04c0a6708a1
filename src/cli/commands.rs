//! CLI command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::experiment::{ExperimentStore, InMemoryExperimentStore};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::init_logging;
use crate::rest_api::ExperimentGroup;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Record counts reported by `check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub data_file: PathBuf,
    pub total: usize,
    pub all: usize,
    pub draft: usize,
    pub first_run: usize,
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            data_file,
            verbose,
        } => {
            let config = resolve_config(config.as_deref(), port, data_file)?;
            serve(config, verbose)
        }
        Command::Check { config, data_file } => {
            let config = resolve_config(config.as_deref(), None, data_file)?;
            let summary = check(&config)?;
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::data_error(format!("JSON error: {}", e)))?;
            println!("{}", json);
            Ok(())
        }
    }
}

/// Load the config file (or defaults) and apply command-line overrides
pub fn resolve_config(
    path: Option<&Path>,
    port: Option<u16>,
    data_file: Option<PathBuf>,
) -> CliResult<HttpServerConfig> {
    let mut config = match path {
        Some(path) => HttpServerConfig::load(path)?,
        None => HttpServerConfig::default(),
    };

    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_file) = data_file {
        config.data_file = data_file;
    }

    config.validate()?;
    Ok(config)
}

/// Load the records named by `config`
pub fn load_store(config: &HttpServerConfig) -> CliResult<InMemoryExperimentStore> {
    Ok(InMemoryExperimentStore::load_json(&config.data_file)?)
}

/// Validate the records file and count what each group would serve
pub fn check(config: &HttpServerConfig) -> CliResult<CheckSummary> {
    let store = load_store(config)?;
    let count = |group: ExperimentGroup| -> CliResult<usize> {
        Ok(group
            .list(&store, None)
            .map_err(|e| CliError::data_error(e.to_string()))?
            .len())
    };

    Ok(CheckSummary {
        data_file: config.data_file.clone(),
        total: store.len()?,
        all: count(ExperimentGroup::all())?,
        draft: count(ExperimentGroup::draft())?,
        first_run: count(ExperimentGroup::first_run())?,
    })
}

/// Load records and serve the HTTP API until interrupted
pub fn serve(config: HttpServerConfig, verbose: bool) -> CliResult<()> {
    init_logging(verbose, config.log_format);

    let store = load_store(&config)?;
    let records = store.len()?;
    tracing::info!(
        data_file = %config.data_file.display(),
        records,
        "experiment records loaded"
    );

    let server = HttpServer::new(config, Arc::new(store));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}
