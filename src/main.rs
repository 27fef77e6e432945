// AIgis - Local PII detection and reversible anonymization
// Copyright (c) 2025 AIgis Contributors
// Licensed under the MIT License

use aigis::cli::Cli;
use aigis::config::{load_config, LoggingConfig};
use aigis::logging::init_logging;
use clap::Parser;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging and the default level come from the config when it loads;
    // commands report config errors themselves
    let config = if Path::new(&cli.config).exists() {
        load_config(&cli.config).ok()
    } else {
        None
    };
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.general.log_level.clone()))
        .unwrap_or_else(|| "warn".to_string());
    let logging_config = config.map(|c| c.logging).unwrap_or_default();

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "AIgis - local PII sanitizer"
    );

    let exit_code = match cli.command.execute(&cli.config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}
