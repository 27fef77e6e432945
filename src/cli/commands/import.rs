//! Import command implementation
//!
//! Accepts either export document type. Vault documents are merged into the
//! vault; settings documents are written back to the configuration file.

use super::{load_or_default, open_vault, report_failure};
use crate::config::save_config;
use crate::domain::AigisError;
use crate::vault::{import_document, ImportOutcome};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Export document to import
    pub file: PathBuf,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Importing document");

        let mut config = match load_or_default(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load configuration", &e)),
        };

        let json = match tokio::fs::read_to_string(&self.file).await {
            Ok(json) => json,
            Err(e) => {
                let error = AigisError::Io(format!("Failed to read {}: {e}", self.file.display()));
                return Ok(report_failure("Import failed", &error));
            }
        };

        let vault = open_vault(&config);
        let outcome = match import_document(&vault, &json).await {
            Ok(outcome) => outcome,
            Err(e) => return Ok(report_failure("Import failed", &e)),
        };

        match outcome {
            ImportOutcome::Vault(summary) => {
                println!(
                    "✅ Vault import: {} added, {} skipped (already mapped)",
                    summary.added, summary.skipped
                );
            }
            ImportOutcome::Settings { settings, stats } => {
                config.apply_settings(&settings);
                if let Err(e) = save_config(config_path, &config) {
                    return Ok(report_failure("Failed to save imported settings", &e));
                }
                println!("✅ Settings imported into {config_path}");
                println!("   Mode: {}", settings.mode);
                println!("   Custom words: {}", config.custom.words.len());
                if stats.is_some() {
                    println!("   Usage statistics in the document were not imported");
                }
            }
        }

        Ok(0)
    }
}
