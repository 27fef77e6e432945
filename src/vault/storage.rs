//! Vault storage backends
//!
//! This module defines the [`VaultStorage`] trait the vault persists through,
//! plus an in-memory backend and a JSON file backend.

use super::document::VaultDocument;
use crate::domain::{AigisError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key-value style persistence for the vault document
///
/// Implementations only move whole documents; consistency and
/// serialization of concurrent writers are the vault's job.
#[async_trait]
pub trait VaultStorage: Send + Sync {
    /// Load the stored document
    ///
    /// Returns an empty document when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`AigisError::Persistence`] if the backend cannot be read or
    /// holds malformed data.
    async fn load(&self) -> Result<VaultDocument>;

    /// Replace the stored document
    ///
    /// # Errors
    ///
    /// Returns [`AigisError::Persistence`] if the write fails.
    async fn save(&self, document: &VaultDocument) -> Result<()>;

    /// Delete everything stored
    ///
    /// # Errors
    ///
    /// Returns [`AigisError::Persistence`] if the delete fails.
    async fn remove(&self) -> Result<()>;
}

/// Volatile storage, mainly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryVaultStorage {
    document: Mutex<Option<VaultDocument>>,
}

impl MemoryVaultStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document
    pub fn with_document(document: VaultDocument) -> Self {
        Self {
            document: Mutex::new(Some(document)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<VaultDocument>>> {
        self.document
            .lock()
            .map_err(|_| AigisError::Persistence("memory vault lock poisoned".to_string()))
    }
}

#[async_trait]
impl VaultStorage for MemoryVaultStorage {
    async fn load(&self) -> Result<VaultDocument> {
        Ok(self.lock()?.clone().unwrap_or_default())
    }

    async fn save(&self, document: &VaultDocument) -> Result<()> {
        *self.lock()? = Some(document.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Vault stored as a pretty-printed JSON file
///
/// Writes go to a sibling `.tmp` file that is then renamed over the target,
/// so a crash mid-write leaves the previous version intact.
#[derive(Debug, Clone)]
pub struct JsonFileVaultStorage {
    path: PathBuf,
}

impl JsonFileVaultStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "vault.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl VaultStorage for JsonFileVaultStorage {
    async fn load(&self) -> Result<VaultDocument> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(VaultDocument::default())
            }
            Err(e) => {
                return Err(AigisError::Persistence(format!(
                    "Failed to read vault {}: {e}",
                    self.path.display()
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(VaultDocument::default());
        }

        serde_json::from_str(&contents).map_err(|e| {
            AigisError::Persistence(format!(
                "Vault file {} is not valid JSON: {e}",
                self.path.display()
            ))
        })
    }

    async fn save(&self, document: &VaultDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AigisError::Persistence(format!(
                    "Failed to create vault directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await.map_err(|e| {
            AigisError::Persistence(format!("Failed to write {}: {e}", temp.display()))
        })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            AigisError::Persistence(format!(
                "Failed to replace vault {}: {e}",
                self.path.display()
            ))
        })
    }

    async fn remove(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AigisError::Persistence(format!(
                "Failed to delete vault {}: {e}",
                self.path.display()
            ))),
        }
    }
}
