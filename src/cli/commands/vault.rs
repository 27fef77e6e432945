//! Vault command implementation
//!
//! Lists, prunes, clears and exports the placeholder vault.

use super::{load_or_default, open_vault, report_failure, write_output};
use crate::sanitizer::masked_preview;
use crate::vault::{vault_envelope, PlaceholderVault};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the vault command
#[derive(Args, Debug)]
pub struct VaultArgs {
    #[command(subcommand)]
    pub action: VaultAction,
}

/// Vault operations
#[derive(Subcommand, Debug)]
pub enum VaultAction {
    /// Show every placeholder with a masked preview of its original
    List,

    /// Remove the given placeholders
    Remove {
        /// Placeholders such as [EMAIL_1]
        #[arg(required = true)]
        placeholders: Vec<String>,
    },

    /// Delete every mapping and reset the counters
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Write the vault as an export document
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl VaultArgs {
    /// Execute the vault command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_default(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load configuration", &e)),
        };
        tracing::info!(vault_path = %config.storage.vault_path.display(), "Opening vault");
        let vault = open_vault(&config);

        match &self.action {
            VaultAction::List => list(&vault).await,
            VaultAction::Remove { placeholders } => remove(&vault, placeholders).await,
            VaultAction::Clear { yes } => clear(&vault, *yes).await,
            VaultAction::Export { output } => export(&vault, output.as_ref()).await,
        }
    }
}

async fn list(vault: &PlaceholderVault) -> anyhow::Result<i32> {
    let entries = match vault.entries().await {
        Ok(entries) => entries,
        Err(e) => return Ok(report_failure("Failed to read vault", &e)),
    };

    if entries.is_empty() {
        println!("🗄️  Vault is empty");
        return Ok(0);
    }

    println!("🗄️  {} placeholder(s)", entries.len());
    println!();
    println!("{:<24} {:<14} ORIGINAL", "PLACEHOLDER", "CATEGORY");
    for entry in entries {
        let category = entry
            .category
            .map(|c| c.stats_key().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<14} {}",
            entry.placeholder,
            category,
            masked_preview(&entry.original)
        );
    }
    Ok(0)
}

async fn remove(vault: &PlaceholderVault, placeholders: &[String]) -> anyhow::Result<i32> {
    match vault.remove_items(placeholders).await {
        Ok(removed) => {
            println!("✅ Removed {removed} of {} placeholder(s)", placeholders.len());
            Ok(0)
        }
        Err(e) => Ok(report_failure("Failed to remove placeholders", &e)),
    }
}

async fn clear(vault: &PlaceholderVault, confirmed: bool) -> anyhow::Result<i32> {
    if !confirmed {
        println!("❌ Refusing to clear the vault without --yes");
        println!("   Placeholders in earlier prompts can no longer be restored afterwards");
        return Ok(2);
    }

    match vault.clear().await {
        Ok(()) => {
            println!("✅ Vault cleared");
            Ok(0)
        }
        Err(e) => Ok(report_failure("Failed to clear vault", &e)),
    }
}

async fn export(vault: &PlaceholderVault, output: Option<&PathBuf>) -> anyhow::Result<i32> {
    let document = match vault.snapshot().await {
        Ok(document) => document,
        Err(e) => return Ok(report_failure("Failed to read vault", &e)),
    };

    let json = serde_json::to_string_pretty(&vault_envelope(&document))?;
    if let Err(e) = write_output(output, &json).await {
        return Ok(report_failure("Failed to write export", &e));
    }

    if let Some(path) = output {
        println!("✅ Exported {} mapping(s) to {}", document.len(), path.display());
    }
    Ok(0)
}
