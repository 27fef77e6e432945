//! Export and import envelopes
//!
//! Vault contents and sanitizer settings leave the process as tagged JSON
//! documents:
//!
//! ```json
//! {
//!   "meta": { "app": "AIgis", "type": "vault", "version": "0.4.0", "date": "2025-01-01T00:00:00Z" },
//!   "mappings": { "[EMAIL_1]": "jane@example.com" }
//! }
//! ```
//!
//! Imports are validated completely before anything is applied.

use super::document::{MergeSummary, VaultDocument};
use super::manager::PlaceholderVault;
use crate::config::SanitizerSettings;
use crate::domain::{AigisError, Result};
use crate::sanitizer::UsageStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Application tag every envelope must carry
pub const APP_TAG: &str = "AIgis";

/// What an envelope contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Vault,
    Settings,
}

/// Envelope header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMeta {
    pub app: String,
    #[serde(rename = "type")]
    pub kind: ExportKind,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl ExportMeta {
    fn new(kind: ExportKind) -> Self {
        Self {
            app: APP_TAG.to_string(),
            kind,
            version: env!("CARGO_PKG_VERSION").to_string(),
            date: Some(Utc::now()),
        }
    }
}

/// Tagged export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub meta: ExportMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SanitizerSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<UsageStats>,
}

/// What an import changed
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// Vault mappings were merged
    Vault(MergeSummary),
    /// A settings document was read; persisting it is up to the caller
    Settings {
        settings: SanitizerSettings,
        stats: Option<UsageStats>,
    },
}

/// Envelope holding every vault mapping
pub fn vault_envelope(document: &VaultDocument) -> ExportEnvelope {
    ExportEnvelope {
        meta: ExportMeta::new(ExportKind::Vault),
        mappings: Some(document.mappings.clone()),
        config: None,
        stats: None,
    }
}

/// Envelope holding sanitizer settings and, optionally, usage statistics
pub fn settings_envelope(settings: &SanitizerSettings, stats: Option<&UsageStats>) -> ExportEnvelope {
    ExportEnvelope {
        meta: ExportMeta::new(ExportKind::Settings),
        mappings: None,
        config: Some(settings.clone()),
        stats: stats.cloned(),
    }
}

fn format_error(message: impl Into<String>) -> AigisError {
    AigisError::ImportFormat(message.into())
}

/// Parse and validate an envelope
///
/// # Errors
///
/// Returns [`AigisError::ImportFormat`] if the text is not JSON, the `meta`
/// block is missing, the app tag or type is unknown, or the payload the type
/// calls for is missing or malformed.
pub fn parse_envelope(json: &str) -> Result<ExportEnvelope> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| format_error(format!("Not valid JSON: {e}")))?;

    let meta = value
        .get("meta")
        .and_then(Value::as_object)
        .ok_or_else(|| format_error("Missing meta block"))?;

    match meta.get("app").and_then(Value::as_str) {
        Some(APP_TAG) => {}
        Some(other) => return Err(format_error(format!("Unknown app tag '{other}'"))),
        None => return Err(format_error("Missing app tag")),
    }

    match meta.get("type").and_then(Value::as_str) {
        Some("vault") | Some("settings") => {}
        Some(other) => return Err(format_error(format!("Unknown document type '{other}'"))),
        None => return Err(format_error("Missing document type")),
    }

    let envelope: ExportEnvelope = serde_json::from_value(value)
        .map_err(|e| format_error(format!("Malformed document: {e}")))?;

    match envelope.meta.kind {
        ExportKind::Vault if envelope.mappings.is_none() => {
            Err(format_error("Vault document has no mappings"))
        }
        ExportKind::Settings if envelope.config.is_none() => {
            Err(format_error("Settings document has no config"))
        }
        _ => Ok(envelope),
    }
}

/// Import a document into `vault`
///
/// Vault documents are merged additively; settings documents are returned
/// for the caller to apply.
///
/// # Errors
///
/// Returns [`AigisError::ImportFormat`] for a rejected document, in which case
/// nothing was applied, or [`AigisError::Persistence`] if the merge could not
/// be saved.
pub async fn import_document(vault: &PlaceholderVault, json: &str) -> Result<ImportOutcome> {
    let envelope = parse_envelope(json)?;

    match envelope.meta.kind {
        ExportKind::Vault => {
            let mappings = envelope.mappings.unwrap_or_default();
            let summary = vault.import_merge(&mappings).await?;
            Ok(ImportOutcome::Vault(summary))
        }
        ExportKind::Settings => {
            let settings = envelope
                .config
                .ok_or_else(|| format_error("Settings document has no config"))?;
            tracing::info!(version = %envelope.meta.version, "Read settings document");
            Ok(ImportOutcome::Settings {
                settings,
                stats: envelope.stats,
            })
        }
    }
}
