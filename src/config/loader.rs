//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AigisConfig;
use crate::domain::errors::AigisError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AigisConfig
/// 4. Applies environment variable overrides (AIGIS_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use aigis::config::loader::load_config;
///
/// let config = load_config("aigis.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AigisConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AigisError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AigisError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Runs the same substitution, override and validation steps as
/// [`load_config`].
///
/// # Errors
///
/// Returns a configuration error if substitution, parsing or validation fails.
pub fn parse_config(contents: &str) -> Result<AigisConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: AigisConfig = toml::from_str(&contents)
        .map_err(|e| AigisError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AigisError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Writes a configuration back to disk as TOML
///
/// Used after a settings import. Comments in the previous file are not kept.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_config(path: impl AsRef<Path>, config: &AigisConfig) -> Result<()> {
    let path = path.as_ref();
    let contents = toml::to_string_pretty(config)
        .map_err(|e| AigisError::Serialization(format!("Failed to serialize config: {e}")))?;

    fs::write(path, contents).map_err(|e| {
        AigisError::Configuration(format!(
            "Failed to write configuration file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AigisError::Pattern(e.to_string()))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comment lines are copied as-is
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AigisError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using AIGIS_* prefix
///
/// Environment variables follow the pattern: AIGIS_<SECTION>_<KEY>
/// For example: AIGIS_GENERAL_MODE, AIGIS_STORAGE_VAULT_PATH
fn apply_env_overrides(config: &mut AigisConfig) -> Result<()> {
    // General overrides
    if let Ok(val) = std::env::var("AIGIS_GENERAL_ENABLED") {
        config.general.enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("AIGIS_GENERAL_MODE") {
        config.general.mode = val.parse().map_err(AigisError::Configuration)?;
    }
    if let Ok(val) = std::env::var("AIGIS_GENERAL_LOG_LEVEL") {
        config.general.log_level = val;
    }

    // Custom words, comma separated
    if let Ok(val) = std::env::var("AIGIS_CUSTOM_WORDS") {
        config.custom.words = val
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(String::from)
            .collect();
    }

    // Storage overrides
    if let Ok(val) = std::env::var("AIGIS_STORAGE_VAULT_PATH") {
        config.storage.vault_path = val.into();
    }
    if let Ok(val) = std::env::var("AIGIS_STORAGE_STATS_PATH") {
        config.storage.stats_path = val.into();
    }

    // Logging overrides
    if let Ok(val) = std::env::var("AIGIS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("AIGIS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
