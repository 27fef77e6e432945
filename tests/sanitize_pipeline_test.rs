//! Integration tests for the sanitization pipeline

use aigis::config::SanitizerSettings;
use aigis::domain::{AigisError, Category, Mode, Result};
use aigis::sanitizer::detector::iban::is_valid_iban;
use aigis::sanitizer::SanitizationEngine;
use aigis::vault::{MemoryVaultStorage, PlaceholderVault, VaultDocument, VaultStorage};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn memory_vault() -> Arc<PlaceholderVault> {
    Arc::new(PlaceholderVault::new(Arc::new(MemoryVaultStorage::new())))
}

fn engine_with(settings: SanitizerSettings) -> SanitizationEngine {
    SanitizationEngine::new(settings, memory_vault()).expect("Failed to build engine")
}

fn developer_settings() -> SanitizerSettings {
    SanitizerSettings {
        mode: Mode::Developer,
        ..SanitizerSettings::default()
    }
}

#[tokio::test]
async fn test_end_to_end_email_and_phone() {
    let engine = engine_with(SanitizerSettings::default());

    let result = engine
        .sanitize("Email me at a@b.com or call 030/123456")
        .await
        .unwrap();

    assert_eq!(
        result.sanitized_text,
        "Email me at [EMAIL_1] or call [PHONE_NUMBER_1]"
    );
    assert_eq!(result.counts.len(), 2);
    assert_eq!(result.counts[&Category::Email], 1);
    assert_eq!(result.counts[&Category::Phone], 1);

    let vault = engine.vault().snapshot().await.unwrap();
    assert_eq!(vault.lookup_original("[EMAIL_1]"), Some("a@b.com"));
    assert_eq!(vault.lookup_original("[PHONE_NUMBER_1]"), Some("030/123456"));
    assert_eq!(vault.counters.len(), 2);
    assert_eq!(vault.counters["EMAIL"], 1);
    assert_eq!(vault.counters["PHONE_NUMBER"], 1);
}

#[tokio::test]
async fn test_same_text_gives_same_output() {
    let engine = engine_with(SanitizerSettings::default());
    let text = "Contact jane@example.com, IBAN DE89370400440532013000, host 8.8.8.8";

    let first = engine.sanitize(text).await.unwrap();
    let second = engine.sanitize(text).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.sanitized_text,
        "Contact [EMAIL_1], IBAN [IBAN_1], host [IP_ADDRESS_1]"
    );
}

#[tokio::test]
async fn test_sanitized_text_is_a_fixed_point() {
    let engine = engine_with(SanitizerSettings::with_custom_words(["Project Falcon"]));
    let text = "Project Falcon: mail ops@example.org, call +49 30 1234567, \
                see https://example.org/docs and C:\\Users\\ops\\notes.txt";

    let first = engine.sanitize(text).await.unwrap();
    let second = engine.sanitize(&first.sanitized_text).await.unwrap();

    assert_eq!(second.sanitized_text, first.sanitized_text);
    assert!(second.session_map.is_empty());
    assert!(second.counts.is_empty());
}

#[tokio::test]
async fn test_value_keeps_its_placeholder_across_calls_and_engines() {
    let vault = memory_vault();
    let first = SanitizationEngine::new(SanitizerSettings::default(), Arc::clone(&vault)).unwrap();
    let second = SanitizationEngine::new(developer_settings(), Arc::clone(&vault)).unwrap();

    let a = first.sanitize("From: jane@example.com").await.unwrap();
    let b = second.sanitize("Reply to jane@example.com please").await.unwrap();

    assert_eq!(a.sanitized_text, "From: [EMAIL_1]");
    assert_eq!(b.sanitized_text, "Reply to [EMAIL_1] please");
    assert_eq!(vault.next_index(Category::Email).await.unwrap(), 2);
}

#[tokio::test]
async fn test_deleted_index_is_never_reused() {
    let engine = engine_with(SanitizerSettings::default());

    engine.sanitize("a@b.com").await.unwrap();
    engine.sanitize("c@d.com").await.unwrap();
    engine.vault().remove_items(&["[EMAIL_2]"]).await.unwrap();

    let again = engine.sanitize("c@d.com").await.unwrap();
    assert_eq!(again.sanitized_text, "[EMAIL_3]");

    let original = engine.sanitize("a@b.com").await.unwrap();
    assert_eq!(original.sanitized_text, "[EMAIL_1]");
}

#[test]
fn test_iban_checksum() {
    assert!(is_valid_iban("DE89370400440532013000"));
    assert!(!is_valid_iban("DE89370400440532013001"));
}

#[tokio::test]
async fn test_invalid_iban_is_left_alone() {
    let engine = engine_with(SanitizerSettings::default());
    let result = engine
        .sanitize("Pay to DE89370400440532013001 today")
        .await
        .unwrap();
    assert_eq!(result.counts.get(&Category::Iban), None);
    assert!(!result.sanitized_text.contains("[IBAN_"));
}

#[tokio::test]
async fn test_longest_custom_term_wins() {
    let engine = engine_with(SanitizerSettings::with_custom_words(["Super", "Superman"]));
    let result = engine.sanitize("Clark Kent is Superman.").await.unwrap();

    assert_eq!(result.sanitized_text, "Clark Kent is [CUSTOM_1].");
    assert_eq!(result.session_map["[CUSTOM_1]"], "Superman");
    assert_eq!(result.counts[&Category::Custom], 1);
}

#[tokio::test]
async fn test_custom_terms_run_before_email() {
    let engine = engine_with(SanitizerSettings::with_custom_words(["jane"]));
    let result = engine.sanitize("jane@example.com").await.unwrap();

    assert_eq!(result.counts[&Category::Custom], 1);
    assert_eq!(result.counts.get(&Category::Email), None);
    assert!(result.sanitized_text.starts_with("[CUSTOM_1]@"));
}

#[tokio::test]
async fn test_custom_term_inside_earlier_placeholder() {
    let engine = engine_with(SanitizerSettings::with_custom_words(["Alice", "TOM"]));
    let result = engine.sanitize("Alice and TOM").await.unwrap();

    assert_eq!(result.sanitized_text, "[CUSTOM_1] and [CUSTOM_2]");
    assert_eq!(result.counts[&Category::Custom], 2);
    assert_eq!(result.session_map["[CUSTOM_2]"], "TOM");

    let restored = engine.restore(&result.sanitized_text).await.unwrap();
    assert_eq!(restored.restored_text, "Alice and TOM");
}

#[tokio::test]
async fn test_long_prose_is_scanned_to_the_end() {
    let engine = engine_with(SanitizerSettings::default());
    let filler = "lorem ipsum dolor sit amet, ".repeat(8_150);
    let text = format!(
        r"{filler}/etc/secret/passwords.txt and call 030/123456 or visit C:\Users\bob\x.txt"
    );
    assert!(text.len() > 200_000);

    let result = engine.sanitize(&text).await.unwrap();

    assert_eq!(
        result.sanitized_text,
        format!("{filler}[FILE_PATH_1] and call [PHONE_NUMBER_1] or visit [FILE_PATH_2]")
    );
    assert_eq!(result.counts[&Category::Path], 2);
    assert_eq!(result.counts[&Category::Phone], 1);
}

#[tokio::test]
async fn test_ip_mode_sensitivity() {
    let text = "192.168.1.1, 10.0.0.5, 127.0.0.1";

    let strict = engine_with(SanitizerSettings::default());
    let result = strict.sanitize(text).await.unwrap();
    assert_eq!(result.counts[&Category::Ip], 3);
    assert_eq!(
        result.sanitized_text,
        "[IP_ADDRESS_1], [IP_ADDRESS_2], [IP_ADDRESS_3]"
    );

    let developer = engine_with(developer_settings());
    let result = developer.sanitize(text).await.unwrap();
    assert_eq!(result.sanitized_text, text);
    assert!(result.counts.is_empty());

    for engine in [strict, developer] {
        let result = engine.sanitize("dns 8.8.8.8").await.unwrap();
        assert_eq!(result.counts[&Category::Ip], 1);
    }
}

#[tokio::test]
async fn test_disabled_module_is_skipped() {
    let mut settings = SanitizerSettings::default();
    settings.modules.set(Category::Email, false);
    settings.modules.set(Category::Url, false);
    let engine = engine_with(settings);

    let result = engine.sanitize("mail a@b.com").await.unwrap();
    assert_eq!(result.sanitized_text, "mail a@b.com");
}

#[tokio::test]
async fn test_disabled_and_empty_are_identity() {
    let engine = engine_with(SanitizerSettings {
        enabled: false,
        ..SanitizerSettings::default()
    });

    let result = engine.sanitize("mail a@b.com").await.unwrap();
    assert_eq!(result.sanitized_text, "mail a@b.com");
    assert!(result.session_map.is_empty());

    let result = engine.sanitize("").await.unwrap();
    assert_eq!(result.sanitized_text, "");
    assert!(engine.vault().snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_restore_reverses_sanitize() {
    let engine = engine_with(SanitizerSettings::default());
    let text = "Ship to Musterstraße 12, 12345 Berlin and mail a@b.com";

    let sanitized = engine.sanitize(text).await.unwrap();
    assert_eq!(sanitized.counts[&Category::Address], 1);

    let restored = engine.restore(&sanitized.sanitized_text).await.unwrap();
    assert_eq!(restored.restored_text, text);
    assert!(restored.unresolved.is_empty());
}

/// Storage that starts failing after a fixed number of saves
struct FlakyStorage {
    inner: Arc<MemoryVaultStorage>,
    saves_left: AtomicUsize,
}

#[async_trait]
impl VaultStorage for FlakyStorage {
    async fn load(&self) -> Result<VaultDocument> {
        self.inner.load().await
    }

    async fn save(&self, document: &VaultDocument) -> Result<()> {
        let allowed = self
            .saves_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !allowed {
            return Err(AigisError::Persistence("disk full".to_string()));
        }
        self.inner.save(document).await
    }

    async fn remove(&self) -> Result<()> {
        self.inner.remove().await
    }
}

#[tokio::test]
async fn test_persistence_failure_keeps_earlier_allocations() {
    let inner = Arc::new(MemoryVaultStorage::new());
    let flaky = Arc::new(FlakyStorage {
        inner: Arc::clone(&inner),
        saves_left: AtomicUsize::new(1),
    });
    let engine = SanitizationEngine::new(
        SanitizerSettings::default(),
        Arc::new(PlaceholderVault::new(flaky)),
    )
    .unwrap();

    let err = engine.sanitize("a@b.com and c@d.com").await.unwrap_err();
    assert!(matches!(err, AigisError::Persistence(_)));

    let committed = inner.load().await.unwrap();
    assert_eq!(committed.find_placeholder("a@b.com"), Some("[EMAIL_1]"));
    assert_eq!(committed.find_placeholder("c@d.com"), None);

    let healthy = SanitizationEngine::new(
        SanitizerSettings::default(),
        Arc::new(PlaceholderVault::new(inner)),
    )
    .unwrap();
    let result = healthy.sanitize("a@b.com and c@d.com").await.unwrap();
    assert_eq!(result.sanitized_text, "[EMAIL_1] and [EMAIL_2]");
}
