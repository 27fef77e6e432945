//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "aigis.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing AIgis configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Add your own sensitive terms under [custom] words");
                println!("  2. Switch mode to \"developer\" to keep local hosts and IPs");
                println!("  3. Validate configuration: aigis validate-config");
                println!("  4. Try it: echo 'mail me at jane@example.com' | aigis sanitize");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Starter configuration with comments
    fn generate_config() -> String {
        r#"# AIgis Configuration File
# Local PII detection and reversible anonymization

[general]
# Master switch; when false, text passes through untouched
enabled = true

# strict: mask everything that looks sensitive
# developer: keep loopback/private IPs, localhost and .local/.test/.example hosts
mode = "strict"

# Log level (trace, debug, info, warn, error)
log_level = "info"

[modules]
email = true
iban = true
phone = true
address = true
ip = true
url = true
path = true
custom = true

[custom]
# Matched case-insensitively; the longest term wins on overlap
words = []
# words = ["ACME Corp", "Project Falcon"]

[storage]
# Placeholder vault; keep it, or earlier placeholders cannot be restored
vault_path = "aigis-vault.json"
stats_path = "aigis-stats.json"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly
"#
        .to_string()
    }
}
