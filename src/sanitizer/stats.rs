//! Usage statistics
//!
//! Accumulates how many prompts were sanitized, how many values of each
//! category were replaced and how the text length changed.

use super::engine::SanitizationResult;
use crate::domain::{AigisError, Category, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Breakdown key for counts whose category has no key of its own
pub const OTHER_KEY: &str = "other";

/// Character totals before and after sanitization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharStats {
    #[serde(default)]
    pub original_chars: u64,
    #[serde(default)]
    pub sanitized_chars: u64,
}

/// Aggregated usage statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Number of recorded sanitize calls
    #[serde(default)]
    pub total_prompts: u64,

    /// Replaced occurrences across all categories
    #[serde(default)]
    pub pii_total: u64,

    /// Replaced occurrences per category key
    #[serde(default = "empty_breakdown")]
    pub pii_breakdown: BTreeMap<String, u64>,

    #[serde(default)]
    pub chars: CharStats,
}

impl Default for UsageStats {
    fn default() -> Self {
        Self {
            total_prompts: 0,
            pii_total: 0,
            pii_breakdown: empty_breakdown(),
            chars: CharStats::default(),
        }
    }
}

fn empty_breakdown() -> BTreeMap<String, u64> {
    Category::PRIORITY
        .iter()
        .map(|c| c.stats_key())
        .chain(std::iter::once(OTHER_KEY))
        .map(|k| (k.to_string(), 0))
        .collect()
}

impl UsageStats {
    /// Add one sanitize call to the totals
    pub fn record(&mut self, original: &str, result: &SanitizationResult) {
        self.total_prompts += 1;

        for (category, count) in &result.counts {
            let count = *count as u64;
            self.pii_total += count;
            self.add_to_breakdown(category.stats_key(), count);
        }

        self.chars.original_chars += original.chars().count() as u64;
        self.chars.sanitized_chars += result.sanitized_text.chars().count() as u64;
    }

    fn add_to_breakdown(&mut self, key: &str, count: u64) {
        let known = empty_breakdown();
        let key = if known.contains_key(key) { key } else { OTHER_KEY };
        *self.pii_breakdown.entry(key.to_string()).or_insert(0) += count;
    }

    /// Characters removed by sanitization, never negative
    pub fn chars_saved(&self) -> u64 {
        self.chars
            .original_chars
            .saturating_sub(self.chars.sanitized_chars)
    }

    /// Zero every counter
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load statistics from a JSON file
    ///
    /// A missing file yields empty statistics.
    ///
    /// # Errors
    ///
    /// Returns [`AigisError::Persistence`] if the file cannot be read or is
    /// not valid JSON.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(AigisError::Persistence(format!(
                    "Failed to read stats {}: {e}",
                    path.display()
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&contents).map_err(|e| {
            AigisError::Persistence(format!("Stats file {} is not valid JSON: {e}", path.display()))
        })
    }

    /// Write statistics to a JSON file, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns [`AigisError::Persistence`] if the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AigisError::Persistence(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        tokio::fs::write(path, json).await.map_err(|e| {
            AigisError::Persistence(format!("Failed to write stats {}: {e}", path.display()))
        })
    }
}
