//! Integration tests for the file-backed placeholder vault

use aigis::domain::Category;
use aigis::vault::{JsonFileVaultStorage, PlaceholderVault};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn file_vault(path: &Path) -> PlaceholderVault {
    PlaceholderVault::new(Arc::new(JsonFileVaultStorage::new(path)))
}

#[tokio::test]
async fn test_mappings_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.json");

    {
        let vault = file_vault(&path);
        let first = vault.resolve_or_allocate("a@b.com", Category::Email).await.unwrap();
        assert!(first.created);
        assert_eq!(first.placeholder, "[EMAIL_1]");
        vault.resolve_or_allocate("/etc/hosts", Category::Path).await.unwrap();
    }

    let reopened = file_vault(&path);
    let again = reopened.resolve_or_allocate("a@b.com", Category::Email).await.unwrap();
    assert!(!again.created);
    assert_eq!(again.placeholder, "[EMAIL_1]");

    let next = reopened.resolve_or_allocate("c@d.com", Category::Email).await.unwrap();
    assert_eq!(next.placeholder, "[EMAIL_2]");
    assert_eq!(
        reopened.lookup_original("[FILE_PATH_1]").await.unwrap().as_deref(),
        Some("/etc/hosts")
    );
}

#[tokio::test]
async fn test_stored_file_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.json");

    let vault = file_vault(&path);
    vault.resolve_or_allocate("a@b.com", Category::Email).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["mappings"]["[EMAIL_1]"], "a@b.com");
    assert_eq!(raw["reverseIndex"]["a@b.com"], "[EMAIL_1]");
    assert_eq!(raw["counters"]["EMAIL"], 1);
}

#[tokio::test]
async fn test_hand_edited_file_is_reconciled() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.json");
    std::fs::write(
        &path,
        r#"{
  "mappings": { "[EMAIL_7]": "old@example.com", "[URL_2]": "https://example.org" },
  "reverseIndex": {},
  "counters": { "EMAIL": 3 }
}"#,
    )
    .unwrap();

    let vault = file_vault(&path);
    assert_eq!(
        vault.find_placeholder("old@example.com").await.unwrap().as_deref(),
        Some("[EMAIL_7]")
    );
    assert_eq!(vault.next_index(Category::Email).await.unwrap(), 8);
    assert_eq!(vault.next_index(Category::Url).await.unwrap(), 3);

    let fresh = vault.resolve_or_allocate("new@example.com", Category::Email).await.unwrap();
    assert_eq!(fresh.placeholder, "[EMAIL_8]");
}

#[tokio::test]
async fn test_corrupt_file_is_persistence_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.json");
    std::fs::write(&path, "{ not json").unwrap();

    let vault = file_vault(&path);
    let err = vault.snapshot().await.unwrap_err();
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test]
async fn test_concurrent_allocations_stay_consistent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.json");
    let vault = Arc::new(file_vault(&path));

    let tasks = (0..12).map(|i| {
        let vault = Arc::clone(&vault);
        tokio::spawn(async move {
            let original = format!("user{}@example.com", i % 4);
            vault.resolve_or_allocate(&original, Category::Email).await
        })
    });
    let allocations: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    assert_eq!(allocations.iter().filter(|a| a.created).count(), 4);

    let document = file_vault(&path).snapshot().await.unwrap();
    assert_eq!(document.len(), 4);
    assert_eq!(document.counters["EMAIL"], 4);
    for i in 0..4 {
        let original = format!("user{i}@example.com");
        let placeholder = document.find_placeholder(&original).unwrap();
        assert_eq!(document.lookup_original(placeholder), Some(original.as_str()));
    }
}

#[tokio::test]
async fn test_remove_and_clear() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.json");
    let vault = file_vault(&path);

    vault.resolve_or_allocate("a@b.com", Category::Email).await.unwrap();
    vault.resolve_or_allocate("c@d.com", Category::Email).await.unwrap();

    let removed = vault.remove_items(&["[EMAIL_1]", "[EMAIL_9]"]).await.unwrap();
    assert_eq!(removed, 1);
    assert_eq!(vault.find_placeholder("a@b.com").await.unwrap(), None);
    assert_eq!(vault.next_index(Category::Email).await.unwrap(), 3);

    vault.clear().await.unwrap();
    assert!(!path.exists());
    assert!(vault.snapshot().await.unwrap().is_empty());
    assert_eq!(vault.next_index(Category::Email).await.unwrap(), 1);
}
