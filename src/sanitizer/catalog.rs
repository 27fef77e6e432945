//! Strategy catalog
//!
//! Builds the ordered list of detection strategies from the sanitizer
//! settings. Order matters: earlier strategies claim text first, and later
//! strategies only ever see what is left after substitution.

use super::detector::{
    AddressStrategy, CustomTermsStrategy, DetectorStrategy, EmailStrategy, IbanStrategy,
    IpStrategy, PathStrategy, PhoneStrategy, UrlStrategy,
};
use crate::config::SanitizerSettings;
use crate::domain::{Category, Result};
use std::sync::Arc;

/// Enabled strategies in priority order
#[derive(Clone, Default)]
pub struct StrategyCatalog {
    strategies: Vec<Arc<dyn DetectorStrategy>>,
}

impl StrategyCatalog {
    /// Build the catalog for `settings`
    ///
    /// Categories follow [`Category::PRIORITY`]. Disabled modules are left
    /// out, and so is the custom strategy when no terms are configured.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AigisError::Pattern`] if a pattern fails to compile.
    pub fn from_settings(settings: &SanitizerSettings) -> Result<Self> {
        let mut strategies: Vec<Arc<dyn DetectorStrategy>> = Vec::new();

        for category in Category::PRIORITY {
            if !settings.modules.is_enabled(category) {
                continue;
            }

            let strategy: Arc<dyn DetectorStrategy> = match category {
                Category::Custom => {
                    let custom = CustomTermsStrategy::new(&settings.custom_words)?;
                    if custom.is_empty() {
                        continue;
                    }
                    Arc::new(custom)
                }
                Category::Email => Arc::new(EmailStrategy::new()?),
                Category::Iban => Arc::new(IbanStrategy::new()?),
                Category::Phone => Arc::new(PhoneStrategy::new()?),
                Category::Address => Arc::new(AddressStrategy::new()?),
                Category::Ip => Arc::new(IpStrategy::new()?),
                Category::Url => Arc::new(UrlStrategy::new()?),
                Category::Path => Arc::new(PathStrategy::new()?),
            };
            strategies.push(strategy);
        }

        tracing::debug!(
            strategies = strategies.len(),
            mode = %settings.mode,
            "Built strategy catalog"
        );

        Ok(Self { strategies })
    }

    /// Catalog over an explicit strategy list, run in the given order
    pub fn from_strategies(strategies: Vec<Arc<dyn DetectorStrategy>>) -> Self {
        Self { strategies }
    }

    /// Strategies in the order they run
    pub fn strategies(&self) -> &[Arc<dyn DetectorStrategy>] {
        &self.strategies
    }

    /// Categories in the order they run
    pub fn categories(&self) -> Vec<Category> {
        self.strategies.iter().map(|s| s.category()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl std::fmt::Debug for StrategyCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyCatalog")
            .field("categories", &self.categories())
            .finish()
    }
}
