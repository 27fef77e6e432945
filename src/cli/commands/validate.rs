//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the AIgis configuration file.

use crate::config::load_config;
use crate::sanitizer::StrategyCatalog;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        // Custom words end up in a pattern, so compile the catalog too
        let settings = config.sanitizer_settings();
        let catalog = match StrategyCatalog::from_settings(&settings) {
            Ok(catalog) => catalog,
            Err(e) => {
                println!("❌ Detector patterns failed to compile");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Enabled: {}", settings.enabled);
        println!("  Mode: {}", settings.mode);
        println!("  Log Level: {}", config.general.log_level);
        println!("  Active Detectors: {:?}", catalog.categories());
        println!("  Custom Words: {}", settings.custom_words.len());
        println!("  Vault File: {}", config.storage.vault_path.display());
        println!("  Stats File: {}", config.storage.stats_path.display());
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::env_lock;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_valid_config() {
        let _env = env_lock();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aigis.toml");
        std::fs::write(&path, "[general]\nmode = \"developer\"\n").unwrap();
        assert_eq!(ValidateArgs {}.execute(path.to_str().unwrap()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let _env = env_lock();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert_eq!(ValidateArgs {}.execute(path.to_str().unwrap()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_invalid_rotation_is_configuration_error() {
        let _env = env_lock();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aigis.toml");
        std::fs::write(&path, "[logging]\nlocal_rotation = \"weekly\"\n").unwrap();
        assert_eq!(ValidateArgs {}.execute(path.to_str().unwrap()).await.unwrap(), 2);
    }
}
