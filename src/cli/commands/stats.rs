//! Stats command implementation

use super::{load_or_default, report_failure};
use crate::domain::Category;
use crate::sanitizer::stats::OTHER_KEY;
use crate::sanitizer::UsageStats;
use clap::Args;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Zero all counters
    #[arg(long)]
    pub reset: bool,
}

impl StatsArgs {
    /// Execute the stats command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_default(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load configuration", &e)),
        };
        let path = &config.storage.stats_path;

        let mut stats = match UsageStats::load_from(path).await {
            Ok(stats) => stats,
            Err(e) => return Ok(report_failure("Failed to read usage statistics", &e)),
        };

        if self.reset {
            stats.reset();
            if let Err(e) = stats.save_to(path).await {
                return Ok(report_failure("Failed to reset usage statistics", &e));
            }
            println!("✅ Usage statistics reset");
            return Ok(0);
        }

        println!("📊 Usage statistics");
        println!();
        println!("  Prompts sanitized: {}", stats.total_prompts);
        println!("  Values replaced:   {}", stats.pii_total);
        println!("  Characters saved:  {}", stats.chars_saved());
        println!();
        println!("  By category:");
        let keys = Category::PRIORITY
            .iter()
            .map(|c| c.stats_key())
            .chain(std::iter::once(OTHER_KEY));
        for key in keys {
            let count = stats.pii_breakdown.get(key).copied().unwrap_or(0);
            println!("    {key:<10} {count}");
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::env_lock;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reset_zeroes_file() {
        let _env = env_lock();
        let dir = TempDir::new().unwrap();
        let stats_path = dir.path().join("stats.json");
        std::fs::write(&stats_path, r#"{ "total_prompts": 7, "pii_total": 12 }"#).unwrap();
        let config_path = dir.path().join("aigis.toml");
        std::fs::write(&config_path, format!("[storage]\nstats_path = {stats_path:?}\n")).unwrap();
        let config_path = config_path.to_str().unwrap();

        assert_eq!(StatsArgs { reset: false }.execute(config_path).await.unwrap(), 0);
        assert_eq!(StatsArgs { reset: true }.execute(config_path).await.unwrap(), 0);

        let stats = UsageStats::load_from(&stats_path).await.unwrap();
        assert_eq!(stats, UsageStats::default());
    }
}
