//! Restore command implementation

use super::{load_or_default, open_vault, read_input, report_failure, write_output};
use crate::sanitizer::SanitizationEngine;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the restore command
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Read text from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RestoreArgs {
    /// Execute the restore command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_default(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load configuration", &e)),
        };

        let engine = match SanitizationEngine::new(config.sanitizer_settings(), open_vault(&config))
        {
            Ok(engine) => engine,
            Err(e) => return Ok(report_failure("Failed to build detectors", &e)),
        };

        let text = match read_input(self.input.as_ref()).await {
            Ok(text) => text,
            Err(e) => return Ok(report_failure("Failed to read input", &e)),
        };

        let result = match engine.restore(&text).await {
            Ok(result) => result,
            Err(e) => return Ok(report_failure("Restore failed", &e)),
        };

        if let Err(e) = write_output(self.output.as_ref(), &result.restored_text).await {
            return Ok(report_failure("Failed to write output", &e));
        }

        eprintln!("✅ Restored {} placeholder(s)", result.restored);
        if !result.unresolved.is_empty() {
            eprintln!("⚠️  Not in vault: {}", result.unresolved.join(", "));
        }

        Ok(0)
    }
}
