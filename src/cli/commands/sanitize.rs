//! Sanitize command implementation
//!
//! Reads text, replaces sensitive values with vault placeholders and writes
//! the result. Status lines go to stderr so stdout carries only the text.

use super::{load_or_default, open_vault, read_input, report_failure, write_output};
use crate::domain::Result;
use crate::sanitizer::{SanitizationEngine, SanitizationResult, UsageStats};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the sanitize command
#[derive(Args, Debug)]
pub struct SanitizeArgs {
    /// Read text from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit the full result (text, session map, counts) as JSON
    #[arg(long)]
    pub json: bool,
}

impl SanitizeArgs {
    /// Execute the sanitize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_default(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load configuration", &e)),
        };

        let vault = open_vault(&config);
        let engine = match SanitizationEngine::new(config.sanitizer_settings(), vault) {
            Ok(engine) => engine,
            Err(e) => return Ok(report_failure("Failed to build detectors", &e)),
        };

        let text = match read_input(self.input.as_ref()).await {
            Ok(text) => text,
            Err(e) => return Ok(report_failure("Failed to read input", &e)),
        };

        let result = match engine.sanitize(&text).await {
            Ok(result) => result,
            Err(e) => return Ok(report_failure("Sanitization failed", &e)),
        };

        let rendered = if self.json {
            serde_json::to_string_pretty(&result)?
        } else {
            result.sanitized_text.clone()
        };
        if let Err(e) = write_output(self.output.as_ref(), &rendered).await {
            return Ok(report_failure("Failed to write output", &e));
        }

        if let Err(e) = record_stats(&config.storage.stats_path, &text, &result).await {
            tracing::warn!(error = %e, "Failed to update usage statistics");
        }

        eprintln!(
            "✅ Replaced {} occurrence(s) of {} value(s)",
            result.total(),
            result.session_map.len()
        );
        for (category, count) in &result.counts {
            eprintln!("   {category}: {count}");
        }

        Ok(0)
    }
}

async fn record_stats(path: &Path, original: &str, result: &SanitizationResult) -> Result<()> {
    let mut stats = UsageStats::load_from(path).await?;
    stats.record(original, result);
    stats.save_to(path).await
}
