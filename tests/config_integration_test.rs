//! Integration tests for configuration loading and validation

use aigis::config::{load_config, save_config, AigisConfig, SanitizerSettings};
use aigis::domain::{Category, Mode};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Serializes tests that read or modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for key in [
        "AIGIS_GENERAL_ENABLED",
        "AIGIS_GENERAL_MODE",
        "AIGIS_GENERAL_LOG_LEVEL",
        "AIGIS_CUSTOM_WORDS",
        "AIGIS_STORAGE_VAULT_PATH",
        "AIGIS_STORAGE_STATS_PATH",
        "AIGIS_LOGGING_LOCAL_ENABLED",
        "AIGIS_LOGGING_LOCAL_PATH",
        "TEST_AIGIS_HOME",
    ] {
        std::env::remove_var(key);
    }
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_temp(
        r#"
[general]
enabled = true
mode = "developer"
log_level = "debug"

[modules]
email = true
iban = false
phone = true
address = false
ip = true
url = true
path = false
custom = true

[custom]
words = ["ACME Corp", "Project Falcon", "acme corp", "  "]

[storage]
vault_path = "/var/lib/aigis/vault.json"
stats_path = "/var/lib/aigis/stats.json"

[logging]
local_enabled = true
local_path = "/var/log/aigis"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert!(config.general.enabled);
    assert_eq!(config.general.mode, Mode::Developer);
    assert_eq!(config.general.log_level, "debug");
    assert!(!config.modules.is_enabled(Category::Iban));
    assert!(!config.modules.is_enabled(Category::Address));
    assert!(!config.modules.is_enabled(Category::Path));
    assert!(config.modules.is_enabled(Category::Ip));
    assert_eq!(config.storage.vault_path, PathBuf::from("/var/lib/aigis/vault.json"));
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    let settings = config.sanitizer_settings();
    assert_eq!(settings.custom_words, vec!["ACME Corp", "Project Falcon"]);
    assert_eq!(settings.mode, Mode::Developer);
}

#[test]
fn test_empty_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_temp("");
    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config, AigisConfig::default());
    assert!(config.general.enabled);
    assert_eq!(config.general.mode, Mode::Strict);
    for category in Category::PRIORITY {
        assert!(config.modules.is_enabled(category));
    }
    assert_eq!(config.storage.vault_path, PathBuf::from("aigis-vault.json"));
    assert_eq!(config.sanitizer_settings(), SanitizerSettings::default());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_AIGIS_HOME", "/home/tester");

    let file = write_temp(
        r#"
[storage]
vault_path = "${TEST_AIGIS_HOME}/.aigis/vault.json"
# stats_path = "${NOT_SET_BUT_COMMENTED}"
"#,
    );
    let config = load_config(file.path());
    cleanup_env_vars();

    let config = config.expect("Failed to load config");
    assert_eq!(
        config.storage.vault_path,
        PathBuf::from("/home/tester/.aigis/vault.json")
    );
}

#[test]
fn test_missing_env_var_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_temp("[storage]\nvault_path = \"${TEST_AIGIS_HOME}/vault.json\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_AIGIS_HOME"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("AIGIS_GENERAL_ENABLED", "false");
    std::env::set_var("AIGIS_GENERAL_MODE", "developer");
    std::env::set_var("AIGIS_CUSTOM_WORDS", "Acme, Falcon ,,acme");
    std::env::set_var("AIGIS_STORAGE_STATS_PATH", "/tmp/aigis-stats.json");

    let file = write_temp("[general]\nmode = \"strict\"\n");
    let config = load_config(file.path());
    cleanup_env_vars();

    let config = config.expect("Failed to load config");
    assert!(!config.general.enabled);
    assert_eq!(config.general.mode, Mode::Developer);
    assert_eq!(config.sanitizer_settings().custom_words, vec!["Acme", "Falcon"]);
    assert_eq!(config.storage.stats_path, PathBuf::from("/tmp/aigis-stats.json"));
}

#[test]
fn test_validation_errors() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[general]\nlog_level = \"verbose\"\n",
        "[general]\nmode = \"paranoid\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[storage]\nvault_path = \"same.json\"\nstats_path = \"same.json\"\n",
        "[storage]\nvault_path = \"\"\n",
    ] {
        let file = write_temp(contents);
        let result = load_config(file.path());
        assert!(result.is_err(), "expected rejection of {contents:?}");
    }
}

#[test]
fn test_missing_file() {
    let result = load_config("/nonexistent/aigis.toml");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[test]
fn test_save_and_reload_after_settings_import() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("aigis.toml");
    std::fs::write(&path, "[storage]\nvault_path = \"mine.json\"\n").unwrap();

    let mut config = load_config(&path).unwrap();
    let mut imported = SanitizerSettings::with_custom_words(["Falcon"]);
    imported.modules.set(Category::Url, false);
    config.apply_settings(&imported);
    save_config(&path, &config).unwrap();

    let reloaded = load_config(&path).unwrap();
    assert_eq!(reloaded.storage.vault_path, PathBuf::from("mine.json"));
    assert_eq!(reloaded.sanitizer_settings(), imported);
}
