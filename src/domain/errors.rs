//! Domain error types
//!
//! This module defines the error hierarchy for AIgis. Library code returns
//! [`AigisError`]; only the CLI layer converts into `anyhow`.

use super::category::Category;
use thiserror::Error;

/// Main AIgis error type
///
/// Every fallible library operation surfaces one of these variants so callers
/// can tell storage trouble apart from malformed input.
#[derive(Debug, Error)]
pub enum AigisError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reading or writing the vault or stats store failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// An imported document is malformed or carries an unknown tag
    #[error("Import format error: {0}")]
    ImportFormat(String),

    /// A detection strategy failed while scanning text
    #[error("Detection failed for {category}: {message}")]
    Detection {
        /// Category of the failing strategy
        category: Category,
        /// Underlying failure description
        message: String,
    },

    /// A detector pattern could not be compiled
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl AigisError {
    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Pattern(_) | Self::Validation(_) => 2,
            Self::ImportFormat(_) => 3,
            Self::Persistence(_) | Self::Io(_) => 4,
            Self::Detection { .. } | Self::Serialization(_) => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AigisError {
    fn from(err: std::io::Error) -> Self {
        AigisError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AigisError {
    fn from(err: serde_json::Error) -> Self {
        AigisError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AigisError {
    fn from(err: toml::de::Error) -> Self {
        AigisError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<regex::Error> for AigisError {
    fn from(err: regex::Error) -> Self {
        AigisError::Pattern(err.to_string())
    }
}
