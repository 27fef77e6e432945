//! Sanitization engine
//!
//! This module provides the [`SanitizationEngine`] that runs the strategy
//! catalog over a text, swaps every accepted value for its vault placeholder
//! and reverses the substitution on the way back.
//!
//! # Examples
//!
//! ```
//! use aigis::config::SanitizerSettings;
//! use aigis::domain::Category;
//! use aigis::sanitizer::SanitizationEngine;
//! use aigis::vault::{MemoryVaultStorage, PlaceholderVault};
//! use std::sync::Arc;
//!
//! # async fn example() -> aigis::domain::Result<()> {
//! let vault = Arc::new(PlaceholderVault::new(Arc::new(MemoryVaultStorage::new())));
//! let engine = SanitizationEngine::new(SanitizerSettings::default(), vault)?;
//!
//! let result = engine.sanitize("Email me at a@b.com or call 030/123456").await?;
//! assert_eq!(result.sanitized_text, "Email me at [EMAIL_1] or call [PHONE_NUMBER_1]");
//! assert_eq!(result.counts[&Category::Email], 1);
//!
//! let restored = engine.restore(&result.sanitized_text).await?;
//! assert_eq!(restored.restored_text, "Email me at a@b.com or call 030/123456");
//! # Ok(())
//! # }
//! ```

use super::catalog::StrategyCatalog;
use super::restore::{PlaceholderScanner, RestorationResult};
use crate::config::SanitizerSettings;
use crate::domain::{Category, Result};
use crate::log_strategy_skipped;
use crate::vault::PlaceholderVault;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Outcome of sanitizing one text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizationResult {
    /// Text with every accepted value replaced by its placeholder
    pub sanitized_text: String,

    /// Placeholder → original for every value replaced in this call
    pub session_map: BTreeMap<String, String>,

    /// Replaced occurrences per category
    pub counts: BTreeMap<Category, usize>,
}

impl SanitizationResult {
    fn unchanged(text: &str) -> Self {
        Self {
            sanitized_text: text.to_string(),
            ..Self::default()
        }
    }

    /// Replaced occurrences across all categories
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// True when nothing was replaced
    pub fn is_clean(&self) -> bool {
        self.session_map.is_empty()
    }
}

/// Settings together with the catalog built from them
#[derive(Debug)]
struct Profile {
    settings: SanitizerSettings,
    catalog: StrategyCatalog,
}

impl Profile {
    fn build(settings: SanitizerSettings) -> Result<Self> {
        let catalog = StrategyCatalog::from_settings(&settings)?;
        Ok(Self { settings, catalog })
    }
}

/// Orchestrates detection, vault lookup and substitution
///
/// The engine can be shared across tasks behind an `Arc`. Reconfiguring
/// swaps the strategy catalog atomically; calls already running finish with
/// the catalog they started with.
pub struct SanitizationEngine {
    profile: RwLock<Arc<Profile>>,
    vault: Arc<PlaceholderVault>,
    scanner: PlaceholderScanner,
}

impl SanitizationEngine {
    /// Create an engine over an existing vault
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AigisError::Pattern`] if a detector pattern
    /// (for example one built from custom words) fails to compile.
    pub fn new(settings: SanitizerSettings, vault: Arc<PlaceholderVault>) -> Result<Self> {
        let profile = Profile::build(settings)?;
        tracing::debug!(
            categories = ?profile.catalog.categories(),
            "Sanitization engine created"
        );

        Ok(Self {
            profile: RwLock::new(Arc::new(profile)),
            vault,
            scanner: PlaceholderScanner::new()?,
        })
    }

    /// Rebuild the strategy catalog from new settings
    ///
    /// The vault is untouched. If the new catalog cannot be built the
    /// previous settings stay active.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AigisError::Pattern`] if a detector pattern
    /// fails to compile.
    pub async fn configure(&self, settings: SanitizerSettings) -> Result<()> {
        let profile = Profile::build(settings)?;
        tracing::info!(
            enabled = profile.settings.enabled,
            mode = %profile.settings.mode,
            categories = ?profile.catalog.categories(),
            "Sanitizer reconfigured"
        );
        *self.profile.write().await = Arc::new(profile);
        Ok(())
    }

    /// Currently active settings
    pub async fn settings(&self) -> SanitizerSettings {
        self.profile.read().await.settings.clone()
    }

    /// The vault this engine allocates placeholders from
    pub fn vault(&self) -> &Arc<PlaceholderVault> {
        &self.vault
    }

    /// Replace sensitive values in `text` with placeholders
    ///
    /// Strategies run one after another in catalog order, each on the text
    /// left by the previous one. For every distinct value a strategy accepts,
    /// occurrences are counted in the current text, the vault is asked for
    /// the value's placeholder and all occurrences are replaced. Placeholders
    /// already in the text are never counted or rewritten.
    ///
    /// A strategy whose scan fails is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AigisError::Persistence`] if the vault cannot
    /// be read or written. Placeholders allocated before the failure stay in
    /// the vault and are reused by later calls.
    #[tracing::instrument(skip_all, fields(chars = text.len()))]
    pub async fn sanitize(&self, text: &str) -> Result<SanitizationResult> {
        let profile = Arc::clone(&*self.profile.read().await);

        if text.is_empty() || !profile.settings.enabled {
            return Ok(SanitizationResult::unchanged(text));
        }

        let mode = profile.settings.mode;
        let mut current = text.to_string();
        let mut session_map = BTreeMap::new();
        let mut counts: BTreeMap<Category, usize> = BTreeMap::new();

        for strategy in profile.catalog.strategies() {
            let category = strategy.category();

            let values = match strategy.find(&current, mode) {
                Ok(matches) => unique_values(matches.iter().map(|m| m.text)),
                Err(e) => {
                    log_strategy_skipped!(category, e);
                    continue;
                }
            };

            for value in values {
                if !strategy.validate(&value, mode) {
                    tracing::trace!(%category, "Candidate rejected by validation");
                    continue;
                }

                let tokens = self.scanner.token_ranges(&current);
                let occurrences: usize = gaps(&current, &tokens)
                    .map(|gap| gap.matches(value.as_str()).count())
                    .sum();
                if occurrences == 0 {
                    continue;
                }

                let allocation = self.vault.resolve_or_allocate(&value, category).await?;
                current = replace_between(&current, &tokens, &value, &allocation.placeholder);
                *counts.entry(category).or_insert(0) += occurrences;
                session_map.insert(allocation.placeholder, value);
            }
        }

        let result = SanitizationResult {
            sanitized_text: current,
            session_map,
            counts,
        };

        tracing::info!(
            replaced = result.total(),
            distinct = result.session_map.len(),
            "Sanitized text"
        );

        Ok(result)
    }

    /// Replace placeholders in `text` with the originals from the vault
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AigisError::Persistence`] if the vault cannot
    /// be read.
    pub async fn restore(&self, text: &str) -> Result<RestorationResult> {
        if self.scanner.find(text).is_empty() {
            return Ok(RestorationResult {
                restored_text: text.to_string(),
                ..RestorationResult::default()
            });
        }

        let snapshot = self.vault.snapshot().await?;
        let result = self.scanner.restore(text, &snapshot);

        if !result.unresolved.is_empty() {
            tracing::warn!(
                unresolved = result.unresolved.len(),
                "Some placeholders are not in the vault"
            );
        }
        tracing::info!(restored = result.restored, "Restored text");

        Ok(result)
    }
}

/// Distinct non-empty values in first-seen order
fn unique_values<'t>(candidates: impl Iterator<Item = &'t str>) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(String::from)
        .collect()
}

/// Stretches of `text` outside the given token ranges
fn gaps<'a>(text: &'a str, tokens: &'a [Range<usize>]) -> impl Iterator<Item = &'a str> {
    let starts = std::iter::once(0).chain(tokens.iter().map(|t| t.end));
    let ends = tokens.iter().map(|t| t.start).chain(std::iter::once(text.len()));
    starts.zip(ends).map(move |(start, end)| &text[start..end])
}

/// Replace `value` with `placeholder`, leaving the token ranges intact
fn replace_between(text: &str, tokens: &[Range<usize>], value: &str, placeholder: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, gap) in gaps(text, tokens).enumerate() {
        out.push_str(&gap.replace(value, placeholder));
        if let Some(token) = tokens.get(i) {
            out.push_str(&text[token.clone()]);
        }
    }
    out
}
