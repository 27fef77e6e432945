//! Configuration management for AIgis.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! AIgis uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting, so an empty file is valid
//! - `AIGIS_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aigis::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("aigis.toml")?;
//!
//! println!("Mode: {}", config.general.mode);
//! println!("Vault: {}", config.storage.vault_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`GeneralConfig`] - Master switch, detection mode, log level
//! - [`ModuleToggles`] - Per-category detector switches
//! - [`CustomWordsConfig`] - User-supplied sensitive terms
//! - [`StorageConfig`] - Vault and stats file locations
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [general]
//! enabled = true
//! mode = "strict"
//!
//! [modules]
//! path = false
//!
//! [custom]
//! words = ["ACME Corp", "Project Falcon"]
//!
//! [storage]
//! vault_path = "${HOME}/.aigis/vault.json"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config, save_config};
pub use schema::{
    AigisConfig, CustomWordsConfig, GeneralConfig, LoggingConfig, ModuleToggles,
    SanitizerSettings, StorageConfig,
};
