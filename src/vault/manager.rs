//! Placeholder vault
//!
//! This module provides [`PlaceholderVault`], the long-lived store that maps
//! original values to placeholders across sessions.

use super::document::{MergeSummary, VaultDocument};
use super::storage::VaultStorage;
use crate::domain::{Category, Placeholder, Result};
use crate::log_placeholder_allocated;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of resolving an original value to its placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// The placeholder text, e.g. `[EMAIL_3]`
    pub placeholder: String,
    /// True when this call issued a new index
    pub created: bool,
}

/// One vault entry, for listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    pub placeholder: String,
    pub original: String,
    pub category: Option<Category>,
}

/// Persistent placeholder vault
///
/// Every operation reloads the document from storage, applies its change
/// and saves it back while holding an async mutex. Within one process this
/// makes allocation linearizable: two concurrent requests for the same
/// original get the same placeholder and no index is handed out twice.
/// Reloading on each operation also picks up edits made to the backing
/// store between calls.
///
/// # Examples
///
/// ```
/// use aigis::domain::Category;
/// use aigis::vault::{MemoryVaultStorage, PlaceholderVault};
/// use std::sync::Arc;
///
/// # async fn example() -> aigis::domain::Result<()> {
/// let vault = PlaceholderVault::new(Arc::new(MemoryVaultStorage::new()));
///
/// let first = vault.resolve_or_allocate("jane@example.com", Category::Email).await?;
/// let again = vault.resolve_or_allocate("jane@example.com", Category::Email).await?;
/// assert_eq!(first.placeholder, "[EMAIL_1]");
/// assert_eq!(again.placeholder, "[EMAIL_1]");
/// assert!(!again.created);
/// # Ok(())
/// # }
/// ```
pub struct PlaceholderVault {
    storage: Arc<dyn VaultStorage>,
    lock: Mutex<()>,
}

impl PlaceholderVault {
    /// Create a vault over a storage backend
    pub fn new(storage: Arc<dyn VaultStorage>) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<VaultDocument> {
        let mut document = self.storage.load().await?;
        document.reconcile();
        Ok(document)
    }

    /// Placeholder already assigned to `original`
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the vault cannot be read.
    pub async fn find_placeholder(&self, original: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(document.find_placeholder(original).map(String::from))
    }

    /// Original value behind `placeholder`
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the vault cannot be read.
    pub async fn lookup_original(&self, placeholder: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(document.lookup_original(placeholder).map(String::from))
    }

    /// Index the next placeholder of `category` would receive
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the vault cannot be read.
    pub async fn next_index(&self, category: Category) -> Result<u64> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(document.next_index(category.prefix()))
    }

    /// Record a mapping and persist it
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the vault cannot be read or written.
    pub async fn add_mapping(
        &self,
        placeholder: &str,
        original: &str,
        category: Category,
    ) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        document.add_mapping(placeholder, original, category.prefix());
        self.storage.save(&document).await
    }

    /// Existing placeholder for `original`, or a freshly allocated one
    ///
    /// Lookup, allocation and save happen in a single critical section. An
    /// allocation is only reported once the save has succeeded.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the vault cannot be read or written;
    /// in that case no placeholder was committed for `original`.
    pub async fn resolve_or_allocate(&self, original: &str, category: Category) -> Result<Allocation> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;

        if let Some(existing) = document.find_placeholder(original) {
            return Ok(Allocation {
                placeholder: existing.to_string(),
                created: false,
            });
        }

        let index = document.next_index(category.prefix());
        let placeholder = Placeholder::new(category, index).to_string();
        document.add_mapping(&placeholder, original, category.prefix());
        self.storage.save(&document).await?;

        log_placeholder_allocated!(placeholder, category.prefix(), original);

        Ok(Allocation {
            placeholder,
            created: true,
        })
    }

    /// Remove the listed placeholders; returns how many existed
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the vault cannot be read or written.
    pub async fn remove_items<S: AsRef<str> + Sync>(&self, placeholders: &[S]) -> Result<usize> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let removed = document.remove_items(placeholders);
        if removed > 0 {
            self.storage.save(&document).await?;
        }
        tracing::info!(requested = placeholders.len(), removed, "Removed vault items");
        Ok(removed)
    }

    /// Delete all mappings and reset counters
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the backend cannot be cleared.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.storage.remove().await?;
        tracing::info!("Vault cleared");
        Ok(())
    }

    /// Additively merge imported mappings
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the vault cannot be read or written.
    pub async fn import_merge(&self, mappings: &BTreeMap<String, String>) -> Result<MergeSummary> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let summary = document.import_merge(mappings);
        self.storage.save(&document).await?;
        tracing::info!(
            added = summary.added,
            skipped = summary.skipped,
            "Merged imported vault mappings"
        );
        Ok(summary)
    }

    /// Consistent copy of the whole vault
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the vault cannot be read.
    pub async fn snapshot(&self) -> Result<VaultDocument> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// All entries ordered by category priority, then index
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the vault cannot be read.
    pub async fn entries(&self) -> Result<Vec<VaultEntry>> {
        let document = self.snapshot().await?;
        let mut entries: Vec<(Option<Placeholder>, VaultEntry)> = document
            .mappings
            .into_iter()
            .map(|(placeholder, original)| {
                let parsed = Placeholder::parse(&placeholder);
                let entry = VaultEntry {
                    category: parsed.as_ref().and_then(Placeholder::category),
                    placeholder,
                    original,
                };
                (parsed, entry)
            })
            .collect();

        entries.sort_by(|(pa, a), (pb, b)| {
            let key = |p: &Option<Placeholder>, e: &VaultEntry| {
                (
                    e.category.is_none(),
                    e.category,
                    p.as_ref().map(|p| p.index()).unwrap_or(0),
                )
            };
            key(pa, a)
                .cmp(&key(pb, b))
                .then_with(|| a.placeholder.cmp(&b.placeholder))
        });

        Ok(entries.into_iter().map(|(_, e)| e).collect())
    }
}
