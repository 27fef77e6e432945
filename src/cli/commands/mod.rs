//! CLI command implementations
//!
//! This module contains all CLI command implementations plus the helpers
//! they share for loading configuration and moving text in and out.

pub mod export_settings;
pub mod import;
pub mod init;
pub mod restore;
pub mod sanitize;
pub mod stats;
pub mod validate;
pub mod vault;

use crate::config::{load_config, parse_config, AigisConfig};
use crate::domain::{AigisError, Result};
use crate::vault::{JsonFileVaultStorage, PlaceholderVault};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Load the configuration, falling back to defaults when the file is absent
///
/// Environment overrides apply in both cases.
pub(crate) fn load_or_default(config_path: &str) -> Result<AigisConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::info!(config_path = %config_path, "No configuration file, using defaults");
        parse_config("")
    }
}

/// Open the vault file named in the configuration
pub(crate) fn open_vault(config: &AigisConfig) -> Arc<PlaceholderVault> {
    let storage = JsonFileVaultStorage::new(&config.storage.vault_path);
    Arc::new(PlaceholderVault::new(Arc::new(storage)))
}

/// Read all of `input`, or stdin when no file is given
pub(crate) async fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AigisError::Io(format!("Failed to read {}: {e}", path.display()))),
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .map_err(|e| AigisError::Io(format!("Failed to read stdin: {e}")))?;
            Ok(buffer)
        }
    }
}

/// Write `contents` to `output`, or stdout when no file is given
pub(crate) async fn write_output(output: Option<&PathBuf>, contents: &str) -> Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, contents)
            .await
            .map_err(|e| AigisError::Io(format!("Failed to write {}: {e}", path.display()))),
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(contents.as_bytes()).await?;
            stdout.flush().await?;
            Ok(())
        }
    }
}

/// Print a failure line to stderr and return the matching exit code
pub(crate) fn report_failure(action: &str, error: &AigisError) -> i32 {
    tracing::error!(error = %error, action, "Command failed");
    eprintln!("❌ {action}");
    eprintln!("   Error: {error}");
    error.exit_code()
}

/// Serializes command tests against config tests that set `AIGIS_*` variables
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    crate::config::loader::tests::ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_broken_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aigis.toml");
        std::fs::write(&path, "[general\nenabled = ").unwrap();
        let err = load_or_default(path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_file_input_and_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "hello").unwrap();

        let text = read_input(Some(&input)).await.unwrap();
        write_output(Some(&output), &text.to_uppercase()).await.unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "HELLO");
    }
}
