//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - JSON-formatted file logs with rotation
//! - Fingerprinting of sensitive values, which are never logged in plaintext
//!
//! # Example
//!
//! ```no_run
//! use aigis::logging::init_logging;
//! use aigis::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

use sha2::{Digest, Sha256};

/// Short SHA-256 fingerprint of a sensitive value
///
/// Twelve hex characters are enough to correlate log lines about the same
/// value without revealing it.
pub fn fingerprint(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let hex = format!("{digest:x}");
    hex[..12].to_string()
}

/// Log a newly allocated vault placeholder
///
/// # Example
///
/// ```no_run
/// use aigis::log_placeholder_allocated;
///
/// log_placeholder_allocated!("[EMAIL_1]", "EMAIL", "jane@example.com");
/// ```
#[macro_export]
macro_rules! log_placeholder_allocated {
    ($placeholder:expr, $prefix:expr, $original:expr) => {
        tracing::debug!(
            placeholder = %$placeholder,
            prefix = %$prefix,
            value_hash = %$crate::logging::fingerprint($original),
            "Allocated placeholder"
        );
    };
}

/// Log a strategy whose scan failed and was skipped
///
/// # Example
///
/// ```no_run
/// use aigis::log_strategy_skipped;
/// use aigis::domain::Category;
///
/// log_strategy_skipped!(Category::Url, "pattern unavailable");
/// ```
#[macro_export]
macro_rules! log_strategy_skipped {
    ($category:expr, $error:expr) => {
        tracing::warn!(
            category = %$category,
            error = %$error,
            "Detection strategy failed, skipping its candidates"
        );
    };
}
