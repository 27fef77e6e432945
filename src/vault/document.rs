//! Persistent vault document
//!
//! The document is the unit the storage backend loads and saves. All
//! invariants (bijective mappings, monotonic counters) are enforced here so
//! that they hold regardless of which backend is in use.

use crate::domain::Placeholder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder ↔ original mappings plus per-prefix counters
///
/// Serialized as `{ "mappings": {..}, "reverseIndex": {..}, "counters": {..} }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultDocument {
    /// placeholder → original
    #[serde(default)]
    pub mappings: BTreeMap<String, String>,

    /// original → placeholder
    #[serde(default)]
    pub reverse_index: BTreeMap<String, String>,

    /// prefix → highest index ever issued
    #[serde(default)]
    pub counters: BTreeMap<String, u64>,
}

/// Outcome of merging imported mappings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    /// Entries added to the vault
    pub added: usize,
    /// Entries skipped because the placeholder or original was already mapped
    pub skipped: usize,
}

impl VaultDocument {
    /// Placeholder already assigned to `original`, if any
    pub fn find_placeholder(&self, original: &str) -> Option<&str> {
        self.reverse_index.get(original).map(String::as_str)
    }

    /// Original value behind `placeholder`, if any
    pub fn lookup_original(&self, placeholder: &str) -> Option<&str> {
        self.mappings.get(placeholder).map(String::as_str)
    }

    /// Index the next placeholder for `prefix` would receive
    pub fn next_index(&self, prefix: &str) -> u64 {
        self.counters.get(prefix).copied().unwrap_or(0) + 1
    }

    /// Record `placeholder` ↔ `original`
    ///
    /// Stale entries on either side are dropped so the mapping stays
    /// one-to-one, and the counter for `prefix` is raised to the index
    /// embedded in the placeholder when that is higher.
    pub fn add_mapping(&mut self, placeholder: &str, original: &str, prefix: &str) {
        if let Some(previous_original) = self.mappings.get(placeholder) {
            if previous_original != original {
                self.reverse_index.remove(previous_original.as_str());
            }
        }
        if let Some(previous_placeholder) = self.reverse_index.get(original) {
            if previous_placeholder != placeholder {
                self.mappings.remove(previous_placeholder.as_str());
            }
        }

        self.mappings
            .insert(placeholder.to_string(), original.to_string());
        self.reverse_index
            .insert(original.to_string(), placeholder.to_string());

        if let Some(parsed) = Placeholder::parse(placeholder) {
            self.raise_counter(prefix, parsed.index());
        }
    }

    /// Remove the listed placeholders; returns how many existed
    ///
    /// Counters are left untouched so removed indices are never reissued.
    pub fn remove_items<S: AsRef<str>>(&mut self, placeholders: &[S]) -> usize {
        let mut removed = 0;
        for placeholder in placeholders {
            if let Some(original) = self.mappings.remove(placeholder.as_ref()) {
                self.reverse_index.remove(&original);
                removed += 1;
            }
        }
        removed
    }

    /// Additive merge of imported mappings
    ///
    /// An entry is skipped when its original already has a placeholder or its
    /// placeholder is already taken. Counters are raised to every well-formed
    /// index seen, skipped entries included, and never lowered.
    pub fn import_merge(&mut self, mappings: &BTreeMap<String, String>) -> MergeSummary {
        let mut summary = MergeSummary::default();

        for (placeholder, original) in mappings {
            let parsed = Placeholder::parse(placeholder);
            if let Some(parsed) = &parsed {
                self.raise_counter(parsed.prefix(), parsed.index());
            }

            if self.reverse_index.contains_key(original) || self.mappings.contains_key(placeholder)
            {
                summary.skipped += 1;
                continue;
            }

            self.mappings.insert(placeholder.clone(), original.clone());
            self.reverse_index
                .insert(original.clone(), placeholder.clone());
            summary.added += 1;
        }

        summary
    }

    /// Restore internal consistency after loading from storage
    ///
    /// `mappings` is authoritative: the reverse index is rebuilt from it and
    /// every counter is raised to at least the highest index among its
    /// prefix's placeholders. Needed because the backing file may have been
    /// edited by hand or written by an interrupted process.
    pub fn reconcile(&mut self) {
        let mut reverse = BTreeMap::new();
        for (placeholder, original) in &self.mappings {
            // Duplicate originals: keep the lexicographically first placeholder
            reverse
                .entry(original.clone())
                .or_insert_with(|| placeholder.clone());
        }
        self.reverse_index = reverse;

        let seen: Vec<(String, u64)> = self
            .mappings
            .keys()
            .filter_map(|p| Placeholder::parse(p))
            .map(|p| (p.prefix().to_string(), p.index()))
            .collect();
        for (prefix, index) in seen {
            self.raise_counter(&prefix, index);
        }
    }

    /// Number of stored mappings
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    fn raise_counter(&mut self, prefix: &str, index: u64) {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        if index > *counter {
            *counter = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let mut doc = VaultDocument::default();
        doc.add_mapping("[EMAIL_1]", "a@b.com", "EMAIL");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["mappings"]["[EMAIL_1]"], "a@b.com");
        assert_eq!(json["reverseIndex"]["a@b.com"], "[EMAIL_1]");
        assert_eq!(json["counters"]["EMAIL"], 1);
    }

    #[test]
    fn test_missing_keys_deserialize_to_empty() {
        let doc: VaultDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.next_index("EMAIL"), 1);
    }

    #[test]
    fn test_add_mapping_raises_counter_only_upwards() {
        let mut doc = VaultDocument::default();
        doc.add_mapping("[URL_5]", "x.com", "URL");
        assert_eq!(doc.next_index("URL"), 6);
        doc.add_mapping("[URL_2]", "y.com", "URL");
        assert_eq!(doc.next_index("URL"), 6);
    }

    #[test]
    fn test_add_mapping_keeps_bijection() {
        let mut doc = VaultDocument::default();
        doc.add_mapping("[EMAIL_1]", "old@b.com", "EMAIL");
        doc.add_mapping("[EMAIL_1]", "new@b.com", "EMAIL");
        assert_eq!(doc.find_placeholder("old@b.com"), None);
        assert_eq!(doc.find_placeholder("new@b.com"), Some("[EMAIL_1]"));

        doc.add_mapping("[EMAIL_2]", "new@b.com", "EMAIL");
        assert_eq!(doc.lookup_original("[EMAIL_1]"), None);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.reverse_index.len(), 1);
    }

    #[test]
    fn test_remove_items_keeps_counters() {
        let mut doc = VaultDocument::default();
        doc.add_mapping("[IBAN_1]", "DE89370400440532013000", "IBAN");
        doc.add_mapping("[IBAN_2]", "GB82WEST12345698765432", "IBAN");

        let removed = doc.remove_items(&["[IBAN_2]", "[IBAN_9]"]);
        assert_eq!(removed, 1);
        assert_eq!(doc.find_placeholder("GB82WEST12345698765432"), None);
        assert_eq!(doc.next_index("IBAN"), 3);
    }

    #[test]
    fn test_import_merge_is_additive() {
        let mut doc = VaultDocument::default();
        doc.add_mapping("[EMAIL_1]", "a@b.com", "EMAIL");

        let mut incoming = BTreeMap::new();
        incoming.insert("[EMAIL_7]".to_string(), "a@b.com".to_string());
        incoming.insert("[EMAIL_1]".to_string(), "other@b.com".to_string());
        incoming.insert("[PHONE_NUMBER_3]".to_string(), "030 1234567".to_string());

        let summary = doc.import_merge(&incoming);
        assert_eq!(summary, MergeSummary { added: 1, skipped: 2 });
        assert_eq!(doc.find_placeholder("a@b.com"), Some("[EMAIL_1]"));
        assert_eq!(doc.lookup_original("[EMAIL_1]"), Some("a@b.com"));
        assert_eq!(doc.next_index("EMAIL"), 8);
        assert_eq!(doc.next_index("PHONE_NUMBER"), 4);
    }

    #[test]
    fn test_reconcile_repairs_hand_edits() {
        let json = r#"{
            "mappings": { "[EMAIL_4]": "a@b.com", "[CUSTOM_2]": "Acme" },
            "reverseIndex": { "stale@b.com": "[EMAIL_1]" },
            "counters": { "EMAIL": 1 }
        }"#;
        let mut doc: VaultDocument = serde_json::from_str(json).unwrap();
        doc.reconcile();

        assert_eq!(doc.find_placeholder("stale@b.com"), None);
        assert_eq!(doc.find_placeholder("a@b.com"), Some("[EMAIL_4]"));
        assert_eq!(doc.next_index("EMAIL"), 5);
        assert_eq!(doc.next_index("CUSTOM"), 3);
    }
}
