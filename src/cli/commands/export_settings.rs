//! Export-settings command implementation

use super::{load_or_default, report_failure, write_output};
use crate::sanitizer::UsageStats;
use crate::vault::settings_envelope;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export-settings command
#[derive(Args, Debug)]
pub struct ExportSettingsArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Leave usage statistics out of the document
    #[arg(long)]
    pub without_stats: bool,
}

impl ExportSettingsArgs {
    /// Execute the export-settings command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_default(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load configuration", &e)),
        };

        let stats = if self.without_stats {
            None
        } else {
            match UsageStats::load_from(&config.storage.stats_path).await {
                Ok(stats) => Some(stats),
                Err(e) => return Ok(report_failure("Failed to read usage statistics", &e)),
            }
        };

        let envelope = settings_envelope(&config.sanitizer_settings(), stats.as_ref());
        let json = serde_json::to_string_pretty(&envelope)?;
        if let Err(e) = write_output(self.output.as_ref(), &json).await {
            return Ok(report_failure("Failed to write export", &e));
        }

        if let Some(path) = &self.output {
            println!("✅ Settings exported to {}", path.display());
        }
        Ok(0)
    }
}
