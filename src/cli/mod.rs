//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for AIgis using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// AIgis - local PII sanitizer
#[derive(Parser, Debug)]
#[command(name = "aigis")]
#[command(version, about, long_about = None)]
#[command(author = "AIgis Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "aigis.toml", env = "AIGIS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "AIGIS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace sensitive values with placeholders
    Sanitize(commands::sanitize::SanitizeArgs),

    /// Replace placeholders with the original values
    Restore(commands::restore::RestoreArgs),

    /// Inspect and manage the placeholder vault
    Vault(commands::vault::VaultArgs),

    /// Import a vault or settings export document
    Import(commands::import::ImportArgs),

    /// Export sanitizer settings and usage statistics
    ExportSettings(commands::export_settings::ExportSettingsArgs),

    /// Show or reset usage statistics
    Stats(commands::stats::StatsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Run the command and return the process exit code
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            Self::Sanitize(args) => args.execute(config_path).await,
            Self::Restore(args) => args.execute(config_path).await,
            Self::Vault(args) => args.execute(config_path).await,
            Self::Import(args) => args.execute(config_path).await,
            Self::ExportSettings(args) => args.execute(config_path).await,
            Self::Stats(args) => args.execute(config_path).await,
            Self::ValidateConfig(args) => args.execute(config_path).await,
            Self::Init(args) => args.execute().await,
        }
    }
}
