// AIgis - Local PII detection and reversible anonymization
// Copyright (c) 2025 AIgis Contributors
// Licensed under the MIT License

//! # AIgis - local PII sanitizer
//!
//! AIgis finds sensitive values in free text (emails, IBANs, phone numbers,
//! postal addresses, IP addresses, URLs, file paths and user-defined terms)
//! and swaps each one for a stable placeholder such as `[EMAIL_1]` before the
//! text leaves the machine. Placeholders in replies are turned back into the
//! originals from the same vault.
//!
//! ## Architecture
//!
//! - [`domain`] - categories, modes, placeholders and errors
//! - [`sanitizer`] - detection strategies, the strategy catalog, the engine
//!   and usage statistics
//! - [`vault`] - the persistent placeholder vault, its storage backends and
//!   export/import documents
//! - [`config`] - TOML configuration with environment overrides
//! - [`logging`] - structured logging
//! - [`cli`] - command-line interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aigis::config::load_config;
//! use aigis::sanitizer::SanitizationEngine;
//! use aigis::vault::{JsonFileVaultStorage, PlaceholderVault};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("aigis.toml")?;
//!
//!     let storage = JsonFileVaultStorage::new(&config.storage.vault_path);
//!     let vault = Arc::new(PlaceholderVault::new(Arc::new(storage)));
//!     let engine = SanitizationEngine::new(config.sanitizer_settings(), vault)?;
//!
//!     let result = engine.sanitize("Write to jane@example.com").await?;
//!     println!("{}", result.sanitized_text); // Write to [EMAIL_1]
//!
//!     let reply = engine.restore("Sent to [EMAIL_1]").await?;
//!     println!("{}", reply.restored_text); // Sent to jane@example.com
//!     Ok(())
//! }
//! ```
//!
//! ## Placeholders
//!
//! The same original always maps to the same placeholder, across calls and
//! restarts. Indices are allocated per category, start at 1 and are never
//! reused, even after a mapping has been removed from the vault.
//!
//! ## Detection Order
//!
//! Strategies run in a fixed order: custom terms, email, IBAN, phone,
//! address, IP, URL, path. Each one sees the text left by the previous ones,
//! so narrow formats claim their values before the broader URL and path
//! patterns run.

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod sanitizer;
pub mod vault;
