//! Configuration schema types
//!
//! This module defines the configuration structure for AIgis. Every section
//! and key is optional; a missing file section falls back to its defaults.

use crate::domain::{Category, Mode};
use crate::sanitizer::detector::custom::normalize_custom_words;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main AIgis configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AigisConfig {
    /// General sanitizer behavior
    #[serde(default)]
    pub general: GeneralConfig,

    /// Per-category detector toggles
    #[serde(default)]
    pub modules: ModuleToggles,

    /// User-supplied sensitive terms
    #[serde(default)]
    pub custom: CustomWordsConfig,

    /// Vault and stats locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AigisConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.general.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Settings the sanitization engine runs with
    ///
    /// Custom words are normalized here: trimmed, blanks dropped and
    /// case-insensitive duplicates removed, keeping the first spelling.
    pub fn sanitizer_settings(&self) -> SanitizerSettings {
        SanitizerSettings {
            enabled: self.general.enabled,
            mode: self.general.mode,
            modules: self.modules.clone(),
            custom_words: normalize_custom_words(&self.custom.words),
        }
    }

    /// Overwrite the sanitizer-facing sections from imported settings
    pub fn apply_settings(&mut self, settings: &SanitizerSettings) {
        self.general.enabled = settings.enabled;
        self.general.mode = settings.mode;
        self.modules = settings.modules.clone();
        self.custom.words = normalize_custom_words(&settings.custom_words);
    }
}

/// General sanitizer behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Master switch; when false text passes through unchanged
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Detection mode (strict, developer)
    #[serde(default)]
    pub mode: Mode,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: Mode::default(),
            log_level: default_log_level(),
        }
    }
}

impl GeneralConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Per-category detector toggles, all enabled by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleToggles {
    #[serde(default = "default_true")]
    pub email: bool,
    #[serde(default = "default_true")]
    pub iban: bool,
    #[serde(default = "default_true")]
    pub phone: bool,
    #[serde(default = "default_true")]
    pub address: bool,
    #[serde(default = "default_true")]
    pub ip: bool,
    #[serde(default = "default_true")]
    pub url: bool,
    #[serde(default = "default_true")]
    pub path: bool,
    #[serde(default = "default_true")]
    pub custom: bool,
}

impl Default for ModuleToggles {
    fn default() -> Self {
        Self {
            email: true,
            iban: true,
            phone: true,
            address: true,
            ip: true,
            url: true,
            path: true,
            custom: true,
        }
    }
}

impl ModuleToggles {
    /// Whether the strategy for `category` should run
    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Custom => self.custom,
            Category::Email => self.email,
            Category::Iban => self.iban,
            Category::Phone => self.phone,
            Category::Address => self.address,
            Category::Ip => self.ip,
            Category::Url => self.url,
            Category::Path => self.path,
        }
    }

    /// Toggle a single category
    pub fn set(&mut self, category: Category, enabled: bool) {
        let slot = match category {
            Category::Custom => &mut self.custom,
            Category::Email => &mut self.email,
            Category::Iban => &mut self.iban,
            Category::Phone => &mut self.phone,
            Category::Address => &mut self.address,
            Category::Ip => &mut self.ip,
            Category::Url => &mut self.url,
            Category::Path => &mut self.path,
        };
        *slot = enabled;
    }
}

/// User-supplied sensitive terms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomWordsConfig {
    /// Terms masked as `[CUSTOM_N]`, matched case-insensitively on word boundaries
    #[serde(default)]
    pub words: Vec<String>,
}

/// Where the vault and usage statistics live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the placeholder vault
    #[serde(default = "default_vault_path")]
    pub vault_path: PathBuf,

    /// JSON file holding usage statistics
    #[serde(default = "default_stats_path")]
    pub stats_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            vault_path: default_vault_path(),
            stats_path: default_stats_path(),
        }
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.vault_path.as_os_str().is_empty() {
            return Err("storage.vault_path cannot be empty".to_string());
        }
        if self.stats_path.as_os_str().is_empty() {
            return Err("storage.stats_path cannot be empty".to_string());
        }
        if self.vault_path == self.stats_path {
            return Err("storage.vault_path and storage.stats_path must differ".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }
        Ok(())
    }
}

/// Sanitizer-facing settings
///
/// This is the part of the configuration that travels in settings
/// export/import envelopes and that [`crate::sanitizer::SanitizationEngine::configure`]
/// accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizerSettings {
    /// Master switch
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Detection mode
    #[serde(default)]
    pub mode: Mode,

    /// Per-category toggles
    #[serde(default)]
    pub modules: ModuleToggles,

    /// Custom sensitive terms
    #[serde(default)]
    pub custom_words: Vec<String>,
}

impl Default for SanitizerSettings {
    fn default() -> Self {
        AigisConfig::default().sanitizer_settings()
    }
}

impl SanitizerSettings {
    /// Settings with the given custom words and everything else default
    pub fn with_custom_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        Self {
            custom_words: normalize_custom_words(&words),
            ..Self::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_vault_path() -> PathBuf {
    PathBuf::from("aigis-vault.json")
}

fn default_stats_path() -> PathBuf {
    PathBuf::from("aigis-stats.json")
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
